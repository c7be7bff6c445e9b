use ratatui::layout::Rect;

/// Compute a centered rectangle inside `area` with width `w` and height `h`.
pub fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = (area.width - w) / 2 + area.x;
    let y = (area.height - h) / 2 + area.y;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_within_bounds() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 40, 10);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 7);
    }

    #[test]
    fn clamps_to_area_when_requested_size_is_larger() {
        let area = Rect::new(0, 0, 10, 10);
        let rect = centered_rect(area, 100, 100);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 10);
    }
}
