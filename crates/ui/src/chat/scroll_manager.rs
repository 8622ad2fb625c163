use gpui::{Pixels, ScrollHandle, point, px};

/// Distance from the tail within which the list keeps following new messages.
const AUTO_FOLLOW_RESUME_THRESHOLD: Pixels = px(24.);
const SCROLL_DELTA_EPSILON: f32 = 1.0;
/// Appended rows are laid out a frame after they are set, so a tail request spans two frames.
const PENDING_SCROLL_FRAMES: u8 = 2;

/// Keeps the message list pinned to its tail while the user has not scrolled away.
pub struct ScrollManager {
    scroll_handle: ScrollHandle,
    pending_frames: u8,
    follow_bottom: bool,
    last_scroll_offset: Pixels,
    last_max_offset: Pixels,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            pending_frames: PENDING_SCROLL_FRAMES,
            follow_bottom: true,
            last_scroll_offset: Pixels::ZERO,
            last_max_offset: Pixels::ZERO,
        }
    }

    pub fn handle(&self) -> &ScrollHandle {
        &self.scroll_handle
    }

    pub fn is_following_bottom(&self) -> bool {
        self.follow_bottom
    }

    pub fn request_scroll_to_bottom(&mut self) {
        self.pending_frames = PENDING_SCROLL_FRAMES;
        self.follow_bottom = true;
    }

    pub fn update_follow_state(&mut self) {
        let offset = self.scroll_handle.offset().y;
        let max_offset = self.scroll_handle.max_offset().height;
        let offset_delta = f32::from(offset) - f32::from(self.last_scroll_offset);
        let content_size_changed =
            (f32::from(max_offset) - f32::from(self.last_max_offset)).abs() > SCROLL_DELTA_EPSILON;
        let user_scrolled_up = offset_delta > SCROLL_DELTA_EPSILON && !content_size_changed;
        let user_scrolled_down = offset_delta < -SCROLL_DELTA_EPSILON && !content_size_changed;

        if self.pending_frames > 0 {
            self.follow_bottom = true;
        } else if self.follow_bottom {
            if user_scrolled_up {
                self.follow_bottom = false;
            }
        } else if user_scrolled_down && self.is_near_bottom() {
            self.follow_bottom = true;
        }

        self.last_scroll_offset = offset;
        self.last_max_offset = max_offset;
    }

    /// Moves to the tail when following. Returns true while another frame is needed.
    pub fn apply_pending_scroll(&mut self) -> bool {
        if !self.follow_bottom && self.pending_frames == 0 {
            return false;
        }

        let max_offset = self.scroll_handle.max_offset().height;
        let current_x = self.scroll_handle.offset().x;
        let target_y = if max_offset > Pixels::ZERO {
            -max_offset
        } else {
            Pixels::ZERO
        };
        self.scroll_handle.set_offset(point(current_x, target_y));
        self.last_scroll_offset = target_y;

        self.pending_frames = self.pending_frames.saturating_sub(1);
        self.pending_frames > 0
    }

    fn is_near_bottom(&self) -> bool {
        let max_offset = self.scroll_handle.max_offset().height;
        if max_offset <= Pixels::ZERO {
            return true;
        }

        // Offsets are negative when scrolled down, so `offset + max` approaches 0 at the tail.
        let offset = self.scroll_handle.offset().y;
        (offset + max_offset).abs() <= AUTO_FOLLOW_RESUME_THRESHOLD
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}
