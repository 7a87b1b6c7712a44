//! Frontier of addresses waiting to be visited
//!
//! The frontier replaces call-stack recursion with an explicit work-list, so the
//! size of a crawl is bounded by memory rather than stack depth, and the visiting
//! order is a policy instead of a side effect.
//!
//! The frontier does not deduplicate. An address may be queued several times
//! (once per page linking to it); the engine's visited check at pop time is what
//! guarantees it is processed once.

use serde::Deserialize;
use std::collections::VecDeque;

/// Order in which pending addresses are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Follow a page's first link to exhaustion before its second one.
    /// Visits pages in the same order as direct recursion would.
    #[default]
    DepthFirst,

    /// Visit every link of a page before any of their links.
    BreadthFirst,
}

/// Work-list of addresses pending a visit
#[derive(Debug, Clone)]
pub struct Frontier {
    order: TraversalOrder,
    pending: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier with the given order
    pub fn new(order: TraversalOrder) -> Self {
        Self {
            order,
            pending: VecDeque::new(),
        }
    }

    /// Queues a single address
    pub fn push(&mut self, address: String) {
        self.pending.push_back(address);
    }

    /// Queues the links discovered on one page, given in page order
    ///
    /// Depth-first frontiers are stacks, so the links are pushed in reverse to
    /// make the first link on the page the next one popped.
    pub fn push_links(&mut self, links: Vec<String>) {
        match self.order {
            TraversalOrder::DepthFirst => self.pending.extend(links.into_iter().rev()),
            TraversalOrder::BreadthFirst => self.pending.extend(links),
        }
    }

    /// Takes the next address to visit
    pub fn pop(&mut self) -> Option<String> {
        match self.order {
            TraversalOrder::DepthFirst => self.pending.pop_back(),
            TraversalOrder::BreadthFirst => self.pending.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
