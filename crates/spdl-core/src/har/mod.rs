//! HAR (HTTP Archive) import.
//!
//! Browser DevTools can export the network log as HAR. Stream playback
//! issues `videomanifest` and `mediasegment` requests against the
//! transcoding service; this module finds the most useful one so it can be
//! handed to [`crate::manifest::normalize`].

mod parse;
mod resolve;

pub use resolve::{find_video_request, CaptureKind, HarCapture};
