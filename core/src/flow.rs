//! # Min-cost max-flow
//!
//! Successive shortest augmenting paths: repeatedly find the cheapest
//! src-to-snk path in the residual graph and push as much flow as it can
//! carry, until no path remains or the caller's flow cap is hit. Each
//! round's shortest path is found with a Dijkstra run over Johnson
//! vertex potentials, so reduced costs stay nonnegative on the residual
//! graph even though a saturated edge's reverse (cancelling) arc has
//! negative cost. Built on [`crate::heap::AdjustableHeap`], the same
//! adjustable min-heap [`crate::castability`]'s search uses.
//!
//! Edge costs must be nonnegative; this is what lets the first round run
//! plain Dijkstra (all potentials start at zero) before potentials take
//! over for every later round.

use crate::heap::{AdjustableHeap, Handle};
use std::collections::HashMap;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy)]
struct EdgeData {
  from: NodeId,
  to: NodeId,
  flow: i64,
  capacity: i64,
  cost: i64,
}

impl EdgeData {
  /// The residual view of this edge as traversed starting from `u`:
  /// `(other_endpoint, residual_capacity, cost_in_this_direction)`.
  /// Traversing from the tail gives the forward residual capacity at the
  /// edge's own cost; traversing from the head gives back however much
  /// flow is already committed, at negated cost (cancelling it).
  fn directed(&self, u: NodeId) -> (NodeId, i64, i64) {
    if self.from == u {
      (self.to, self.capacity - self.flow, self.cost)
    } else {
      (self.from, self.flow, -self.cost)
    }
  }

  fn add_flow(&mut self, u: NodeId, amount: i64) {
    if self.from == u {
      self.flow += amount;
    } else {
      self.flow -= amount;
    }
  }
}

/// A min-cost max-flow network, built up by [`add_edge`](Self::add_edge)
/// calls and solved by [`add_flow`](Self::add_flow).
#[derive(Default)]
pub struct MinCostFlow {
  incident: HashMap<NodeId, Vec<usize>>,
  edges: Vec<EdgeData>,
  potential: HashMap<NodeId, i64>,
}

impl MinCostFlow {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a directed edge `u -> v` with the given capacity and per-unit
  /// cost. Parallel edges between the same pair are allowed.
  pub fn add_edge(&mut self, u: NodeId, v: NodeId, capacity: i64, cost: i64) {
    let index = self.edges.len();
    self.edges.push(EdgeData { from: u, to: v, flow: 0, capacity, cost });
    self.incident.entry(u).or_insert_with(Vec::new).push(index);
    self.incident.entry(v).or_insert_with(Vec::new).push(index);
  }

  /// The flow currently committed on the edge added by the `index`-th
  /// call to [`add_edge`](Self::add_edge), in the direction it was added.
  pub fn edge_flow(&self, index: usize) -> i64 {
    self.edges[index].flow
  }

  fn potential_of(&self, node: NodeId) -> i64 {
    *self.potential.get(&node).unwrap_or(&0)
  }

  /// Pushes as much flow as possible from `src` to `snk`, capped at
  /// `flow_max` if given, always along the cheapest available augmenting
  /// path. Returns `(flow_pushed, total_cost)`.
  pub fn add_flow(&mut self, src: NodeId, snk: NodeId, flow_max: Option<i64>) -> (i64, i64) {
    let mut flow = 0i64;
    let mut flow_cost = 0i64;

    while flow_max.map_or(true, |max| flow < max) {
      let start_flow = match flow_max {
        Some(max) => max - flow,
        None => i64::MAX,
      };

      // dist[v] = (distance from src, edge used to reach v, bottleneck
      // flow achievable on the path to v so far).
      let mut dist: HashMap<NodeId, (i64, Option<usize>, i64)> = HashMap::new();
      let mut handles: HashMap<NodeId, Handle> = HashMap::new();
      let mut heap: AdjustableHeap<(NodeId, i64, i64), i64, _> = AdjustableHeap::new(|state: &(NodeId, i64, i64)| state.1);

      dist.insert(src, (0, None, start_flow));
      handles.insert(src, heap.push((src, 0, start_flow)));

      while !heap.is_empty() {
        let (u, dst, flow_cur) = heap.pop();
        handles.remove(&u);

        let incident = match self.incident.get(&u) {
          Some(indices) => indices.clone(),
          None => continue,
        };
        for edge_index in incident {
          let (v, cap, cost) = self.edges[edge_index].directed(u);
          if cap == 0 {
            continue;
          }
          let new_dist = dst + cost + self.potential_of(u) - self.potential_of(v);
          let new_flow = flow_cur.min(cap);

          match dist.get(&v).copied() {
            None => {
              dist.insert(v, (new_dist, Some(edge_index), new_flow));
              handles.insert(v, heap.push((v, new_dist, new_flow)));
            }
            Some((v_dist, ..)) if new_dist < v_dist => {
              dist.insert(v, (new_dist, Some(edge_index), new_flow));
              if let Some(&handle) = handles.get(&v) {
                heap.adjust(handle, (v, new_dist, new_flow));
              }
            }
            _ => {}
          }
        }
      }

      let (snk_dist, _, snk_flow) = match dist.get(&snk).copied() {
        Some(d) => d,
        None => break,
      };

      log::debug!(
        "add_flow: augmenting path src={} snk={} bottleneck={} reduced_cost={}",
        src,
        snk,
        snk_flow,
        snk_dist
      );

      flow += snk_flow;
      flow_cost += snk_dist + self.potential_of(snk);
      for (&v, &(d, _, _)) in dist.iter() {
        *self.potential.entry(v).or_insert(0) += d;
      }

      let mut v = snk;
      loop {
        let edge_index = match dist.get(&v).unwrap().1 {
          Some(e) => e,
          None => break,
        };
        let (pred, _, _) = self.edges[edge_index].directed(v);
        self.edges[edge_index].add_flow(pred, snk_flow);
        v = pred;
      }
    }

    (flow, flow_cost)
  }
}
