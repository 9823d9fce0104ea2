use crate::core::Cylinder;

/// Greedy nearest-first order. Among equally near requests the one listed
/// first in the input wins.
pub fn service_order(head: Cylinder, requests: &[Cylinder]) -> Vec<Cylinder> {
    // Removal keeps the remaining requests in input order
    let mut pending = requests.to_vec();
    let mut order = Vec::with_capacity(pending.len());
    let mut pos = head;

    while !pending.is_empty() {
        let mut best = 0;
        for (i, &r) in pending.iter().enumerate().skip(1) {
            if r.abs_diff(pos) < pending[best].abs_diff(pos) {
                best = i;
            }
        }
        pos = pending.remove(best);
        order.push(pos);
    }

    order
}
