use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::geometry::{Circle, Tolerance};
use super::beach_line::ArcId;

/// The next thing the sweep line reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Site(usize),
    Circle(usize),
}

/// A predicted arc collapse. Invalidated in place instead of being removed from the heap.
#[derive(Clone, Debug)]
pub(crate) struct CircleEvent {
    pub arc: ArcId,
    pub circle: Circle,
    pub valid: bool,
}

/// Heap entry: ordered so that the maximum is the event with the highest bottom y, then the
/// smallest x, then the earliest insertion.
#[derive(Clone, Copy, Debug)]
struct Queued {
    id: usize,
    x: f64,
    y: f64,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| other.x.total_cmp(&self.x))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Site events in sweep order plus a lazily invalidated heap of circle events.
pub(crate) struct EventQueue {
    order: Vec<usize>,
    next_site: usize,
    circles: Vec<CircleEvent>,
    heap: BinaryHeap<Queued>,
}

impl EventQueue {
    /// Orders sites by descending y, ties broken by ascending x.
    pub fn new(sites: &[[f64; 2]]) -> Self {
        let mut order: Vec<usize> = (0..sites.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (sites[a], sites[b]);
            pb[1]
                .partial_cmp(&pa[1])
                .unwrap_or(Ordering::Equal)
                .then_with(|| pa[0].partial_cmp(&pb[0]).unwrap_or(Ordering::Equal))
                .then_with(|| a.cmp(&b))
        });
        Self {
            order,
            next_site: 0,
            circles: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    pub fn push_circle(&mut self, arc: ArcId, circle: Circle) -> usize {
        let id = self.circles.len();
        self.circles.push(CircleEvent {
            arc,
            circle,
            valid: true,
        });
        self.heap.push(Queued {
            id,
            x: circle.center[0],
            y: circle.bottom,
        });
        id
    }

    pub fn invalidate(&mut self, id: usize) {
        self.circles[id].valid = false;
    }

    pub fn circle(&self, id: usize) -> &CircleEvent {
        &self.circles[id]
    }

    /// Number of circle events ever scheduled, valid or not.
    pub fn circles_scheduled(&self) -> usize {
        self.circles.len()
    }

    pub fn remaining_sites(&self) -> usize {
        self.order.len() - self.next_site
    }

    fn peek_valid_circle(&mut self) -> Option<Queued> {
        while let Some(top) = self.heap.peek() {
            if self.circles[top.id].valid {
                return Some(*top);
            }
            self.heap.pop();
        }
        None
    }

    /// Pops the next event.
    ///
    /// A circle event whose bottom matches the next site's y (within tolerance) fires first only
    /// if its x does not exceed the site's x.
    pub fn pop(&mut self, sites: &[[f64; 2]], tol: &Tolerance) -> Option<Event> {
        let circle = self.peek_valid_circle();
        let site = self.order.get(self.next_site).copied();

        let site_first = match (site, circle) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(s), Some(c)) => {
                let p = sites[s];
                if tol.approx_eq(p[1], c.y) {
                    p[0] < c.x - tol.epsilon
                } else {
                    p[1] > c.y
                }
            }
        };

        if site_first {
            self.next_site += 1;
            site.map(Event::Site)
        } else {
            self.heap.pop();
            circle.map(|c| {
                self.circles[c.id].valid = false;
                Event::Circle(c.id)
            })
        }
    }
}
