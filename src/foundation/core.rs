pub use kurbo::Vec2;

/// Absolute instant on the page clock, in whole milliseconds since mount of
/// the hosting document.
///
/// Durations and offsets are plain `u64` millisecond counts; `Millis` is
/// reserved for points in time so the two cannot be mixed up silently.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Shift this instant forward by `ms`.
    pub fn offset(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, or 0 when `earlier` is in the
    /// future (a scheduled activation that has not started yet).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 0 transparent .. 255 opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_saturates_for_future_instants() {
        assert_eq!(Millis(100).since(Millis(40)), 60);
        assert_eq!(Millis(40).since(Millis(100)), 0);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(Millis(10).offset(5), Millis(15));
        assert_eq!(Millis(u64::MAX).offset(1), Millis(u64::MAX));
    }
}
