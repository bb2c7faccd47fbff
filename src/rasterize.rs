//! Scan conversion of clipped edges into horizontal spans
//!
//! Spans are reported as `(y, left, right)` covering pixels `[left, right)` of the
//! scanline `y`. Pixel is covered if its center is inside of the shape, ties are
//! resolved by rounding intersections half away from zero.
use crate::{Edge, utils::round_to_int};

/// Fill shape whose every scanline is crossed by exactly two edges
///
/// Edges are expected to come from a convex polygon, if a lone edge is left on
/// some scanline the edge set is inconsistent and this function panics.
pub fn fill_convex_edges(mut edges: Vec<Edge>, mut span: impl FnMut(i32, i32, i32)) {
    if edges.is_empty() {
        return;
    }
    edges.sort_by(Edge::activation_cmp);

    let mut y = edges[0].top;
    while !edges.is_empty() {
        assert!(edges.len() >= 2, "active edge underflow at scanline {}", y);
        let mut left = round_to_int(edges[0].cur_x);
        let mut right = round_to_int(edges[1].cur_x);
        if left > right {
            std::mem::swap(&mut left, &mut right);
        }
        if left < right {
            span(y, left, right);
        }

        edges[0].advance();
        edges[1].advance();
        if edges[1].is_last(y) {
            edges.remove(1);
        }
        if edges[0].is_last(y) {
            edges.remove(0);
        }
        y += 1;
    }
}

/// Fill arbitrary set of closed contours with non-zero winding rule
///
/// Scanlines at or below `bottom` are not visited. Winding of each scanline must
/// sum up to zero, which holds for edges of closed contours, otherwise this function panics.
pub fn fill_winding_edges(mut edges: Vec<Edge>, bottom: i32, mut span: impl FnMut(i32, i32, i32)) {
    // edges[..active] are crossing current scanline and ordered by x, the rest
    // are waiting to become active ordered by (top, x)
    edges.sort_by(Edge::activation_cmp);

    let mut y = match edges.first() {
        Some(edge) => edge.top,
        None => return,
    };
    while y < bottom {
        let Some(first) = edges.first() else {
            break;
        };
        // skip empty scanlines between contours
        if first.top > y {
            y = first.top;
            continue;
        }

        let mut winding = 0;
        let mut left = 0;
        let mut index = 0;
        while index < edges.len() && edges[index].is_active(y) {
            let edge = &mut edges[index];
            let x = round_to_int(edge.cur_x);
            if winding == 0 {
                left = x;
            }
            winding += edge.winding;
            if winding == 0 && left < x {
                span(y, left, x);
            }

            edge.advance();
            if edge.is_last(y) {
                edges.remove(index);
            } else {
                index += 1;
            }
        }
        assert_eq!(winding, 0, "unbalanced winding at scanline {}", y);
        y += 1;

        while index < edges.len() && edges[index].is_active(y) {
            index += 1;
        }
        edges[..index].sort_by(|e0, e1| e0.cur_x.total_cmp(&e1.cur_x));
    }
}
