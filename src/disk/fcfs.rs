use crate::core::Cylinder;

/// Requests exactly as listed; no reordering.
pub fn service_order(requests: &[Cylinder]) -> Vec<Cylinder> {
    requests.to_vec()
}
