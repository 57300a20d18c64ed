//! Fortune's sweep over the sites, producing the unbounded Voronoi graph.
//!
//! The sweep line moves from the top of the plane (largest y) downwards. Arcs of the beach line
//! are stored in an arena, and every edge is traced by the breakpoint to the left of some arc.
//! Edges whose endpoints are still open when the queue runs dry are rays or full lines, and are
//! bounded later by the clipper.

mod beach_line;
mod events;

use crate::geometry::{circumcenter, circumcircle_bottom, Tolerance};
use beach_line::{ArcId, ArcLocation, BeachLine};
use events::{Event, EventQueue};

/// An edge of the unbounded diagram.
///
/// While both endpoints are unset the edge is the full bisector of `left` and `right`. With only
/// `start` set it is a ray leaving `start` with `left` on its left-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEdge {
    pub left: usize,
    pub right: usize,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Output of a completed sweep: Voronoi vertices and the edges between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawDiagram {
    pub vertices: Vec<[f64; 2]>,
    pub edges: Vec<RawEdge>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Running,
    Done,
}

/// Incremental sweep over a set of sites.
///
/// ```
/// use vorosweep::sweep::SweepLine;
/// use vorosweep::Tolerance;
///
/// let sites = [[0.0, 10.0], [-5.0, 0.0], [5.0, 0.0]];
/// let raw = SweepLine::new(&sites, Tolerance::default()).finish();
/// assert_eq!(raw.vertices.len(), 1);
/// assert_eq!(raw.edges.len(), 3);
/// ```
pub struct SweepLine<'a> {
    sites: &'a [[f64; 2]],
    tol: Tolerance,
    queue: EventQueue,
    beach: BeachLine,
    vertices: Vec<[f64; 2]>,
    edges: Vec<RawEdge>,
    sweep_y: f64,
    state: SweepState,
}

impl<'a> SweepLine<'a> {
    /// Prepares a sweep. Sites are expected to be finite and pairwise distinct.
    pub fn new(sites: &'a [[f64; 2]], tol: Tolerance) -> Self {
        Self {
            sites,
            tol,
            queue: EventQueue::new(sites),
            beach: BeachLine::new(),
            vertices: Vec::new(),
            edges: Vec::new(),
            sweep_y: f64::INFINITY,
            state: SweepState::Idle,
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Current position of the sweep line.
    pub fn sweep_y(&self) -> f64 {
        self.sweep_y
    }

    /// Sites of the beach-line arcs from left to right.
    pub fn beach_sites(&self) -> Vec<usize> {
        self.beach.sites()
    }

    /// Processes one event. Returns `false` once the queue is exhausted.
    pub fn step(&mut self) -> bool {
        if self.state == SweepState::Done {
            return false;
        }
        self.state = SweepState::Running;

        match self.queue.pop(self.sites, &self.tol) {
            Some(Event::Site(site)) => self.handle_site(site),
            Some(Event::Circle(id)) => self.handle_circle(id),
            None => {
                self.state = SweepState::Done;
                tracing::trace!(
                    vertices = self.vertices.len(),
                    edges = self.edges.len(),
                    circles = self.queue.circles_scheduled(),
                    "sweep finished"
                );
                return false;
            }
        }
        true
    }

    /// Runs the remaining events and hands over the diagram.
    pub fn finish(mut self) -> RawDiagram {
        while self.step() {}
        RawDiagram {
            vertices: self.vertices,
            edges: self.edges,
        }
    }

    fn handle_site(&mut self, site: usize) {
        let [x, y] = self.sites[site];
        self.sweep_y = y;

        let location = self.beach.locate(self.sites, x, y, &self.tol);
        tracing::trace!(site, x, y, ?location, remaining = self.queue.remaining_sites(), "site event");

        match location {
            ArcLocation::Empty => {
                self.beach.insert_after(None, site);
            }
            ArcLocation::RightOf(last) => self.append_arc(last, site),
            ArcLocation::Inside(arc) => self.split_arc(arc, site),
            ArcLocation::Between(left, right) => self.split_breakpoint(left, right, site),
        }
    }

    /// A site of the first row, right of every arc so far.
    fn append_arc(&mut self, last: ArcId, site: usize) {
        let left_site = self.beach.arc(last).site;
        let arc = self.beach.insert_after(Some(last), site);
        let edge = self.new_edge(left_site, site);
        self.beach.arc_mut(arc).edge = Some(edge);
    }

    /// Splits `arc` in two around a new arc for `site`.
    fn split_arc(&mut self, arc: ArcId, site: usize) {
        self.detach_circle(arc);

        let split_site = self.beach.arc(arc).site;
        let middle = self.beach.insert_after(Some(arc), site);
        let copy = self.beach.insert_after(Some(middle), split_site);

        // Both new breakpoints trace the same bisector, in opposite directions.
        let edge = self.new_edge(split_site, site);
        self.beach.arc_mut(middle).edge = Some(edge);
        self.beach.arc_mut(copy).edge = Some(edge);

        self.attach_circle(arc);
        self.attach_circle(copy);
    }

    /// The new site lies exactly below the breakpoint of `left` and `right`: the breakpoint becomes
    /// a vertex and two new edges start there.
    fn split_breakpoint(&mut self, left: ArcId, right: ArcId, site: usize) {
        let left_site = self.beach.arc(left).site;
        let right_site = self.beach.arc(right).site;

        let Some(center) = circumcenter(
            self.sites[left_site],
            self.sites[site],
            self.sites[right_site],
            &self.tol,
        ) else {
            tracing::trace!(site, left_site, right_site, "breakpoint at infinity, splitting arc");
            self.split_arc(left, site);
            return;
        };

        self.detach_circle(left);
        self.detach_circle(right);

        let right_edge = self.beach.arc(right).edge;
        debug_assert!(right_edge.is_some(), "inner arc without a left edge");
        let vertex = self.vertex_at(center, right_edge);
        if let Some(edge) = right_edge {
            self.set_edge_start(edge, left_site, right_site, vertex);
        }

        let arc = self.beach.insert_after(Some(left), site);
        let left_edge = self.new_edge_ending(left_site, site, vertex);
        let right_edge = self.new_edge_ending(site, right_site, vertex);
        self.beach.arc_mut(arc).edge = Some(left_edge);
        self.beach.arc_mut(right).edge = Some(right_edge);

        self.attach_circle(left);
        self.attach_circle(right);
    }

    fn handle_circle(&mut self, id: usize) {
        let event = self.queue.circle(id).clone();
        let center = event.circle.center;
        self.sweep_y = event.circle.bottom;

        let arc = event.arc;
        let (Some(mut left), Some(mut right)) = (self.beach.arc(arc).prev, self.beach.arc(arc).next)
        else {
            debug_assert!(false, "circle event on an outer arc");
            return;
        };

        tracing::trace!(arc, x = center[0], y = center[1], sweep_y = self.sweep_y, "circle event");

        self.beach.arc_mut(arc).circle = None;
        self.beach.remove(arc);

        // Neighbours converging on the same point vanish together.
        let mut vanished_left = Vec::new();
        while self.converges_at(left, center) {
            let Some(prev) = self.beach.arc(left).prev else { break };
            self.detach_circle(left);
            self.beach.remove(left);
            vanished_left.push(left);
            left = prev;
        }
        let mut vanished_right = Vec::new();
        while self.converges_at(right, center) {
            let Some(next) = self.beach.arc(right).next else { break };
            self.detach_circle(right);
            self.beach.remove(right);
            vanished_right.push(right);
            right = next;
        }
        self.detach_circle(left);
        self.detach_circle(right);

        let mut chain = Vec::with_capacity(vanished_left.len() + vanished_right.len() + 3);
        chain.push(left);
        chain.extend(vanished_left.into_iter().rev());
        chain.push(arc);
        chain.extend(vanished_right);
        chain.push(right);

        let touching: Vec<usize> = chain.iter().filter_map(|&a| self.beach.arc(a).edge).collect();
        let vertex = self.vertex_near(center, &touching);

        for pair in chain.windows(2) {
            let l_site = self.beach.arc(pair[0]).site;
            let r = self.beach.arc(pair[1]);
            if let Some(edge) = r.edge {
                let r_site = r.site;
                self.set_edge_start(edge, l_site, r_site, vertex);
            }
        }

        let edge = self.new_edge_ending(self.beach.arc(left).site, self.beach.arc(right).site, vertex);
        self.beach.arc_mut(right).edge = Some(edge);

        self.attach_circle(left);
        self.attach_circle(right);
    }

    fn converges_at(&self, arc: ArcId, center: [f64; 2]) -> bool {
        self.beach
            .arc(arc)
            .circle
            .is_some_and(|c| self.tol.same_point(self.queue.circle(c).circle.center, center))
    }

    /// Schedules the collapse of `arc` if its neighbours converge on it.
    fn attach_circle(&mut self, arc: ArcId) {
        self.detach_circle(arc);

        let a = self.beach.arc(arc);
        let (Some(prev), Some(next)) = (a.prev, a.next) else { return };
        let left_site = self.beach.arc(prev).site;
        let right_site = self.beach.arc(next).site;
        if left_site == right_site {
            return;
        }

        if let Some(circle) = circumcircle_bottom(
            self.sites[left_site],
            self.sites[a.site],
            self.sites[right_site],
            &self.tol,
        ) {
            let id = self.queue.push_circle(arc, circle);
            self.beach.arc_mut(arc).circle = Some(id);
        }
    }

    fn detach_circle(&mut self, arc: ArcId) {
        if let Some(id) = self.beach.arc_mut(arc).circle.take() {
            self.queue.invalidate(id);
        }
    }

    fn new_edge(&mut self, left: usize, right: usize) -> usize {
        self.edges.push(RawEdge {
            left,
            right,
            start: None,
            end: None,
        });
        self.edges.len() - 1
    }

    fn new_edge_ending(&mut self, left: usize, right: usize, vertex: usize) -> usize {
        let edge = self.new_edge(left, right);
        self.set_edge_end(edge, left, right, vertex);
        edge
    }

    /// Records `vertex` as the end of `edge` that is reached when walking with `left` on the left.
    ///
    /// An edge without endpoints adopts the given orientation.
    fn set_edge_start(&mut self, edge: usize, left: usize, right: usize, vertex: usize) {
        let e = &mut self.edges[edge];
        if e.start.is_none() && e.end.is_none() {
            e.start = Some(vertex);
            e.left = left;
            e.right = right;
        } else if e.left == right {
            e.end = Some(vertex);
        } else {
            e.start = Some(vertex);
        }
    }

    fn set_edge_end(&mut self, edge: usize, left: usize, right: usize, vertex: usize) {
        self.set_edge_start(edge, right, left, vertex);
    }

    fn vertex_at(&mut self, p: [f64; 2], edge: Option<usize>) -> usize {
        match edge {
            Some(e) => self.vertex_near(p, &[e]),
            None => self.push_vertex(p),
        }
    }

    /// Reuses an endpoint of `edges` lying on `p`, or creates a new vertex.
    fn vertex_near(&mut self, p: [f64; 2], edges: &[usize]) -> usize {
        let existing = edges
            .iter()
            .flat_map(|&e| [self.edges[e].start, self.edges[e].end])
            .flatten()
            .find(|&v| self.tol.same_point(self.vertices[v], p));
        match existing {
            Some(v) => v,
            None => self.push_vertex(p),
        }
    }

    fn push_vertex(&mut self, p: [f64; 2]) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }
}
