//! Auto-scroll of a scrollable tab row

use segment_tabs::TabView;

/// Scroll delta that brings the newly selected tab into view.
///
/// Moving forward tries to also reveal the next tab, moving backward the
/// previous one. Targets are clamped to `[0, content_width - viewport_width]`.
/// Returns `None` when no scroll is needed.
pub fn reveal_scroll_delta(
    views: &[TabView],
    index: usize,
    prev: usize,
    scroll_x: i32,
    viewport_width: i32,
    content_width: i32,
) -> Option<i32> {
    if viewport_width <= 0 || index >= views.len() {
        return None;
    }

    let scroll_end = (content_width - viewport_width).max(0);
    let target = if index > prev {
        if index + 1 >= views.len() {
            Some(scroll_end)
        } else {
            let next_right = views[index + 1].right();
            (next_right > scroll_x + viewport_width)
                .then(|| (next_right - viewport_width).min(scroll_end))
        }
    } else if index == 0 {
        Some(0)
    } else {
        let prev_left = views[index - 1].left;
        (prev_left < scroll_x).then(|| prev_left.max(0))
    };

    target
        .map(|t| t.clamp(0, scroll_end) - scroll_x)
        .filter(|dx| *dx != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(count: usize, width: i32) -> Vec<TabView> {
        (0..count)
            .map(|i| TabView {
                left: i as i32 * width,
                width,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_forward_reveals_next_tab() {
        let views = row(5, 100);
        assert_eq!(reveal_scroll_delta(&views, 1, 0, 0, 250, 500), Some(50));
        assert_eq!(reveal_scroll_delta(&views, 2, 1, 100, 250, 500), Some(50));
    }

    #[test]
    fn test_forward_to_last_scrolls_to_end() {
        let views = row(5, 100);
        assert_eq!(reveal_scroll_delta(&views, 4, 1, 50, 250, 500), Some(200));
        assert_eq!(reveal_scroll_delta(&views, 4, 1, 250, 250, 500), None);
    }

    #[test]
    fn test_backward_reveals_previous_tab() {
        let views = row(5, 100);
        assert_eq!(reveal_scroll_delta(&views, 2, 4, 250, 250, 500), Some(-150));
        assert_eq!(reveal_scroll_delta(&views, 0, 2, 100, 250, 500), Some(-100));
    }

    #[test]
    fn test_visible_tab_does_not_scroll() {
        let views = row(5, 100);
        assert_eq!(reveal_scroll_delta(&views, 1, 0, 0, 400, 500), None);
        assert_eq!(reveal_scroll_delta(&views, 3, 4, 150, 250, 500), None);
        // Unknown viewport
        assert_eq!(reveal_scroll_delta(&views, 1, 0, 0, 0, 500), None);
    }
}
