//! Horizontal-row grouper (component §4.7): groups a layout's children
//! into reading-order rows using a vertical-overlap-ratio heuristic, robust
//! to the small vertical jitter that real OCR geometry exhibits.

use crate::geometry::BoundingBox;

/// Groups `boxes` into rows. `boxes[i]` must correspond to the `i`th
/// element of whatever sequence the caller is grouping — the returned
/// groups are lists of indices into `boxes`, each group sorted ascending
/// by `left`, groups themselves in ascending reading order.
///
/// A box joins the growing group when the sum of its vertical overlap with
/// every group member, divided by the tallest member's height, is at least
/// `overlap_ratio`; otherwise the group closes and a new one starts.
pub fn group_rows(boxes: &[BoundingBox], overlap_ratio: f64) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        boxes[a].top.partial_cmp(&boxes[b].top).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    for idx in order {
        if current.is_empty() {
            current.push(idx);
            continue;
        }

        let max_height = current.iter().map(|&m| boxes[m].height).fold(0.0_f64, f64::max);
        let overlap_sum: f64 = current.iter().map(|&m| boxes[idx].vertical_overlap(&boxes[m])).sum();
        let ratio = if max_height > 0.0 { overlap_sum / max_height } else { 0.0 };

        if ratio >= overlap_ratio {
            current.push(idx);
        } else {
            groups.push(std::mem::take(&mut current));
            current.push(idx);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    for group in &mut groups {
        group.sort_by(|&a, &b| boxes[a].left.partial_cmp(&boxes[b].left).unwrap_or(std::cmp::Ordering::Equal));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(left: f64, top: f64, height: f64) -> BoundingBox {
        BoundingBox::new(left, top, 0.2, height)
    }

    #[test]
    fn scenario_d_jittered_rows() {
        // tops 0.10, 0.11, 0.25; lefts 0.5, 0.1, 0.1; heights all 0.03
        let boxes = vec![bb(0.5, 0.10, 0.03), bb(0.1, 0.11, 0.03), bb(0.1, 0.25, 0.03)];
        let groups = group_rows(&boxes, 0.5);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![1, 0]);
        assert_eq!(groups[1], vec![2]);
    }

    #[test]
    fn single_box_is_its_own_group() {
        let boxes = vec![bb(0.0, 0.0, 0.1)];
        let groups = group_rows(&boxes, 0.5);
        assert_eq!(groups, vec![vec![0]]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let boxes: Vec<BoundingBox> = vec![];
        assert!(group_rows(&boxes, 0.5).is_empty());
    }
}
