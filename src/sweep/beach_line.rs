use crate::geometry::{breakpoint_x, Tolerance};

pub(crate) type ArcId = usize;

/// One parabolic arc of the beach line.
#[derive(Clone, Debug)]
pub(crate) struct Arc {
    pub site: usize,
    pub prev: Option<ArcId>,
    pub next: Option<ArcId>,
    /// Edge traced by the breakpoint on the left of this arc. Only the leftmost arc has none.
    pub edge: Option<usize>,
    /// Pending circle event in which this arc is the middle one.
    pub circle: Option<usize>,
}

/// Where a new site falls relative to the beach line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArcLocation {
    /// The beach line has no arcs yet.
    Empty,
    /// Strictly inside the arc.
    Inside(ArcId),
    /// On the breakpoint between two adjacent arcs.
    Between(ArcId, ArcId),
    /// Right of the rightmost arc, which only happens on the first row of equal-y sites.
    RightOf(ArcId),
}

/// Left-to-right sequence of arcs, stored as a doubly linked list in an arena.
///
/// Removed arcs stay in the arena so that their site and edge can still be read while a circle
/// event is being resolved.
#[derive(Default)]
pub(crate) struct BeachLine {
    arcs: Vec<Arc>,
    head: Option<ArcId>,
    len: usize,
}

impl BeachLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id]
    }

    #[inline]
    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id]
    }

    /// Inserts a new arc for `site` right after `after`, or at the front when `after` is `None`.
    pub fn insert_after(&mut self, after: Option<ArcId>, site: usize) -> ArcId {
        let id = self.arcs.len();
        let next = match after {
            Some(a) => self.arcs[a].next,
            None => self.head,
        };
        self.arcs.push(Arc {
            site,
            prev: after,
            next,
            edge: None,
            circle: None,
        });
        match after {
            Some(a) => self.arcs[a].next = Some(id),
            None => self.head = Some(id),
        }
        if let Some(n) = next {
            self.arcs[n].prev = Some(id);
        }
        self.len += 1;
        id
    }

    /// Unlinks an arc from the sequence.
    pub fn remove(&mut self, id: ArcId) {
        let Arc { prev, next, .. } = self.arcs[id];
        match prev {
            Some(p) => self.arcs[p].next = next,
            None => self.head = next,
        }
        if let Some(n) = next {
            self.arcs[n].prev = prev;
        }
        self.len -= 1;
    }

    /// Sites of the arcs from left to right.
    pub fn sites(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            out.push(self.arcs[id].site);
            cursor = self.arcs[id].next;
        }
        out
    }

    fn left_breakpoint(&self, id: ArcId, sites: &[[f64; 2]], sweep_y: f64) -> f64 {
        let arc = &self.arcs[id];
        let site = sites[arc.site];
        if site[1] <= sweep_y {
            return site[0];
        }
        match arc.prev {
            Some(p) => breakpoint_x(sites[self.arcs[p].site], site, sweep_y),
            None => f64::NEG_INFINITY,
        }
    }

    fn right_breakpoint(&self, id: ArcId, sites: &[[f64; 2]], sweep_y: f64) -> f64 {
        let arc = &self.arcs[id];
        match arc.next {
            Some(n) => self.left_breakpoint(n, sites, sweep_y),
            None => {
                let site = sites[arc.site];
                if site[1] <= sweep_y { site[0] } else { f64::INFINITY }
            }
        }
    }

    /// Finds the arc directly above `x` when the sweep line is at `sweep_y`.
    ///
    /// Breakpoints within `tol.epsilon` of `x` are reported as [`ArcLocation::Between`].
    pub fn locate(&self, sites: &[[f64; 2]], x: f64, sweep_y: f64, tol: &Tolerance) -> ArcLocation {
        let mut cursor = self.head;
        let mut last = None;

        while let Some(id) = cursor {
            let dxr = x - self.right_breakpoint(id, sites, sweep_y);
            if dxr > tol.epsilon {
                last = Some(id);
                cursor = self.arcs[id].next;
                continue;
            }

            let dxl = self.left_breakpoint(id, sites, sweep_y) - x;
            debug_assert!(
                dxl <= tol.epsilon || self.arcs[id].prev.is_none(),
                "beach line breakpoints are not monotonic at x = {}",
                x
            );

            let arc = &self.arcs[id];
            if dxl > -tol.epsilon {
                if let Some(p) = arc.prev {
                    return ArcLocation::Between(p, id);
                }
            } else if dxr > -tol.epsilon {
                if let Some(n) = arc.next {
                    return ArcLocation::Between(id, n);
                }
            }
            return ArcLocation::Inside(id);
        }

        match last {
            Some(id) => ArcLocation::RightOf(id),
            None => ArcLocation::Empty,
        }
    }
}
