//! Responsive video-layout selection.
//!
//! A pure, deterministic function of the current feed set: recomputing with
//! the same inputs always yields the same layout, so dimension-change events
//! can simply call it again.
//!
//! Known limitation: with two or more remote feeds only the first (by join
//! order) is laid out; the rest are omitted from view. This matches the
//! single-remote layout of the reference behavior and is deliberately not
//! extended into a speculative grid.

/// Who owns a video feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The user's own camera.
    Local,
    /// Another participant's stream.
    Remote,
}

/// A local or remote participant video stream, with its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFeed {
    /// Local or remote.
    pub ownership: Ownership,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,
}

impl VideoFeed {
    /// Derived orientation. Square frames count as landscape.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Feed orientation derived from its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// How a primary feed fills the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Crop to fill, preserving aspect ratio.
    Cover,
    /// Letterbox to show the whole frame.
    Contain,
}

/// Corner the picture-in-picture overlay is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Shape of the picture-in-picture box, from the local feed's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipShape {
    /// Taller than wide (portrait local feed).
    Tall,
    /// Wider than tall (landscape local feed).
    Wide,
}

/// Picture-in-picture overlay placement for the local feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipOverlay {
    pub corner: OverlayCorner,
    pub shape: PipShape,
}

/// Cosmetic layout knobs. Historical page variants differed only in these,
/// so they are flags rather than separate code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Where the local overlay is anchored.
    pub overlay_corner: OverlayCorner,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overlay_corner: OverlayCorner::BottomRight,
        }
    }
}

/// The selected layout for the current feed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Nothing to render (local device not ready). Blank viewport, not an
    /// error.
    Empty,

    /// Local feed alone, filling the viewport.
    LocalFullscreen { fit: Fit },

    /// One remote feed as primary with the local feed overlaid.
    RemotePrimary { fit: Fit, pip: PipOverlay },
}

/// Select the layout for the current set of feeds.
///
/// Deterministic and pure: identical inputs yield identical output. With
/// multiple remote feeds, the first in `remotes` (join order) is primary
/// and the rest are omitted.
#[must_use]
pub fn select_layout(
    local: Option<&VideoFeed>,
    remotes: &[VideoFeed],
    options: &LayoutOptions,
) -> Layout {
    // Device not ready yet: render nothing rather than an error.
    let Some(local) = local else {
        return Layout::Empty;
    };

    let Some(primary) = remotes.first() else {
        return Layout::LocalFullscreen { fit: Fit::Cover };
    };

    // Portrait remote video is letterboxed so faces are not cropped;
    // landscape fills the viewport.
    let fit = match primary.orientation() {
        Orientation::Portrait => Fit::Contain,
        Orientation::Landscape => Fit::Cover,
    };

    let shape = match local.orientation() {
        Orientation::Portrait => PipShape::Tall,
        Orientation::Landscape => PipShape::Wide,
    };

    Layout::RemotePrimary {
        fit,
        pip: PipOverlay {
            corner: options.overlay_corner,
            shape,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn feed(ownership: Ownership, width: u32, height: u32) -> VideoFeed {
        VideoFeed {
            ownership,
            width,
            height,
        }
    }

    fn local_landscape() -> VideoFeed {
        feed(Ownership::Local, 1280, 720)
    }

    #[test]
    fn test_no_local_feed_renders_nothing() {
        let layout = select_layout(None, &[], &LayoutOptions::default());
        assert_eq!(layout, Layout::Empty);
    }

    #[test]
    fn test_no_local_feed_with_remotes_still_renders_nothing() {
        let remotes = [feed(Ownership::Remote, 1280, 720)];
        let layout = select_layout(None, &remotes, &LayoutOptions::default());
        assert_eq!(layout, Layout::Empty);
    }

    #[test]
    fn test_zero_remotes_local_fullscreen_cover() {
        let local = local_landscape();
        let layout = select_layout(Some(&local), &[], &LayoutOptions::default());
        assert_eq!(layout, Layout::LocalFullscreen { fit: Fit::Cover });
    }

    #[test]
    fn test_landscape_remote_uses_cover() {
        let local = local_landscape();
        let remotes = [feed(Ownership::Remote, 1920, 1080)];

        let layout = select_layout(Some(&local), &remotes, &LayoutOptions::default());

        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                fit: Fit::Cover,
                ..
            }
        ));
    }

    #[test]
    fn test_portrait_remote_uses_contain() {
        let local = local_landscape();
        let remotes = [feed(Ownership::Remote, 720, 1280)];

        let layout = select_layout(Some(&local), &remotes, &LayoutOptions::default());

        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                fit: Fit::Contain,
                ..
            }
        ));
    }

    #[test]
    fn test_pip_shape_follows_local_orientation() {
        let portrait_local = feed(Ownership::Local, 720, 1280);
        let remotes = [feed(Ownership::Remote, 1920, 1080)];

        let layout = select_layout(Some(&portrait_local), &remotes, &LayoutOptions::default());
        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                pip: PipOverlay {
                    shape: PipShape::Tall,
                    ..
                },
                ..
            }
        ));

        let landscape_local = local_landscape();
        let layout = select_layout(Some(&landscape_local), &remotes, &LayoutOptions::default());
        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                pip: PipOverlay {
                    shape: PipShape::Wide,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_pip_anchored_to_configured_corner() {
        let local = local_landscape();
        let remotes = [feed(Ownership::Remote, 1920, 1080)];
        let options = LayoutOptions {
            overlay_corner: OverlayCorner::TopLeft,
        };

        let layout = select_layout(Some(&local), &remotes, &options);

        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                pip: PipOverlay {
                    corner: OverlayCorner::TopLeft,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_multiple_remotes_first_is_primary() {
        let local = local_landscape();
        // First remote portrait, second landscape: the portrait one decides.
        let remotes = [
            feed(Ownership::Remote, 720, 1280),
            feed(Ownership::Remote, 1920, 1080),
        ];

        let layout = select_layout(Some(&local), &remotes, &LayoutOptions::default());

        assert!(matches!(
            layout,
            Layout::RemotePrimary {
                fit: Fit::Contain,
                ..
            }
        ));
    }

    #[test]
    fn test_square_frame_counts_as_landscape() {
        let square = feed(Ownership::Remote, 1080, 1080);
        assert_eq!(square.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let local = feed(Ownership::Local, 720, 1280);
        let remotes = [
            feed(Ownership::Remote, 1280, 720),
            feed(Ownership::Remote, 720, 1280),
        ];
        let options = LayoutOptions::default();

        let first = select_layout(Some(&local), &remotes, &options);
        let second = select_layout(Some(&local), &remotes, &options);

        assert_eq!(first, second);
    }
}
