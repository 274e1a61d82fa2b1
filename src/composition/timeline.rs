/// Frame budget of one slideshow run
///
/// Each photo is held for `hold_frames`; every consecutive pair is joined by
/// `fade_frames` blended frames. The last photo has no outgoing transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub image_count: usize,
    pub hold_frames: usize,
    pub fade_frames: usize,
    pub fps: u32,
}

impl FramePlan {
    /// Plan `image_count` photos at `fps`, durations in seconds
    pub fn new(image_count: usize, fps: u32, photo_duration: f64, fade_duration: f64) -> Self {
        Self {
            image_count,
            hold_frames: seconds_to_frames(photo_duration, fps),
            fade_frames: seconds_to_frames(fade_duration, fps),
            fps,
        }
    }

    pub fn transition_count(&self) -> usize {
        self.image_count.saturating_sub(1)
    }

    /// `N * hold + (N - 1) * fade`
    pub fn total_frames(&self) -> usize {
        self.image_count * self.hold_frames + self.transition_count() * self.fade_frames
    }

    pub fn duration_secs(&self) -> f64 {
        self.total_frames() as f64 / self.fps as f64
    }

    /// Blend factor of transition frame `f`, `f / fade_frames`
    pub fn fade_alpha(&self, f: usize) -> f64 {
        f as f64 / self.fade_frames.max(1) as f64
    }

    /// Blend factors for one transition, `f` in `0..fade_frames`.
    /// Starts at 0.0 and never reaches 1.0.
    pub fn fade_alphas(&self) -> impl Iterator<Item = f64> {
        let plan = *self;
        (0..self.fade_frames).map(move |f| plan.fade_alpha(f))
    }
}

fn seconds_to_frames(seconds: f64, fps: u32) -> usize {
    (seconds * fps as f64).round().max(0.0) as usize
}
