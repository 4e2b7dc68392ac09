// The camera-to-upload lifecycle: one CaptureSession per capture modal.

use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::camera::{CameraBackend, Facing, Frame, MediaDevice};
use crate::error::AppError;

/// Frame size used when the source reports no natural dimensions.
const FALLBACK_WIDTH: u32 = 640;
const FALLBACK_HEIGHT: u32 = 480;

/// A captured still, ready for preview and upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    /// PNG-encoded frame.
    pub bytes: Vec<u8>,
    /// Displayable data URL for the preview image element.
    pub data_url: String,
    /// Generated from the capture timestamp.
    pub file_name: String,
}

/// Encode a frame losslessly to PNG plus a preview data URL.
///
/// Pure transformation apart from the allocation; the caller owns the result.
pub fn encode_still(frame: &Frame) -> Result<CapturedImage, AppError> {
    let (width, height) = if frame.width > 0 && frame.height > 0 {
        (frame.width, frame.height)
    } else {
        (FALLBACK_WIDTH, FALLBACK_HEIGHT)
    };

    let mut rgba = frame.rgba.clone();
    rgba.resize((width as usize) * (height as usize) * 4, 0);
    let raster = RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| AppError::ImageEncoding("frame buffer size mismatch".to_string()))?;

    let mut bytes = Vec::new();
    raster
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| AppError::ImageEncoding(format!("PNG encode failed: {}", e)))?;

    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let data_url = format!("data:image/png;base64,{}", b64);
    let file_name = format!("capture_{}.png", chrono::Utc::now().timestamp_millis());

    Ok(CapturedImage {
        bytes,
        data_url,
        file_name,
    })
}

/// States of a single camera-to-upload interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Acquiring,
    Previewing,
    Captured,
    Uploading,
    Error,
}

/// State machine owning the camera stream for the duration of a capture.
///
/// The stream is held exclusively while not `Idle` and is released on every
/// terminal transition: cancel, upload success, unrecoverable error, drop.
pub struct CaptureSession {
    device: MediaDevice,
    state: CaptureState,
    image: Option<CapturedImage>,
}

impl CaptureSession {
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self {
            device: MediaDevice::new(backend),
            state: CaptureState::Idle,
            image: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.device.is_live()
    }

    /// Idle → Acquiring → Previewing. On denial or absent hardware the
    /// session drops back to Error without entering the preview state.
    pub fn open(&mut self, facing: Facing) -> Result<(), AppError> {
        self.state = CaptureState::Acquiring;
        match self.device.acquire(facing) {
            Ok(()) => {
                self.state = CaptureState::Previewing;
                Ok(())
            }
            Err(e) => {
                self.state = CaptureState::Error;
                Err(e)
            }
        }
    }

    /// Previewing → Captured: snapshot the current frame. The stream stays
    /// live so a retake does not need to re-acquire.
    pub fn capture(&mut self) -> Result<&CapturedImage, AppError> {
        if self.state != CaptureState::Previewing {
            return Err(AppError::Validation(
                "nothing to capture, camera not previewing".to_string(),
            ));
        }
        let frame = self.device.frame()?;
        let image = self.image.insert(encode_still(&frame)?);
        self.state = CaptureState::Captured;
        Ok(image)
    }

    /// Captured → Previewing: discard the still and go back to the live view.
    pub fn retake(&mut self) -> Result<(), AppError> {
        if self.state != CaptureState::Captured {
            return Err(AppError::Validation("no capture to discard".to_string()));
        }
        self.image = None;
        self.state = CaptureState::Previewing;
        Ok(())
    }

    /// Captured → Uploading. Returns the image to submit; refuses while a
    /// submission is already in flight so a double-click cannot double-post.
    pub fn begin_upload(&mut self) -> Result<CapturedImage, AppError> {
        match self.state {
            CaptureState::Uploading => Err(AppError::Validation(
                "upload already in progress".to_string(),
            )),
            CaptureState::Captured => {
                let image = self
                    .image
                    .clone()
                    .ok_or_else(|| AppError::Validation("no captured image".to_string()))?;
                self.state = CaptureState::Uploading;
                Ok(image)
            }
            _ => Err(AppError::Validation("no captured image".to_string())),
        }
    }

    /// Uploading → Idle on success (stream released, session fully reset);
    /// Uploading → Captured on failure so the user can retry.
    pub fn finish_upload(&mut self, success: bool) {
        if self.state != CaptureState::Uploading {
            return;
        }
        if success {
            self.cancel();
        } else {
            self.state = CaptureState::Captured;
        }
    }

    /// Terminal transition from any state: release the stream, drop the
    /// capture, back to Idle. Used by explicit cancel and modal close.
    pub fn cancel(&mut self) {
        self.device.release();
        self.image = None;
        self.state = CaptureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::testing::FakeBackend;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn session_with_counter() -> (CaptureSession, Arc<std::sync::atomic::AtomicUsize>) {
        let backend = FakeBackend::new();
        let live = Arc::clone(&backend.live_streams);
        (CaptureSession::new(Box::new(backend)), live)
    }

    #[test]
    fn test_full_capture_upload_cycle_releases_stream() {
        let (mut session, live) = session_with_counter();

        session.open(Facing::Rear).unwrap();
        assert_eq!(session.state(), CaptureState::Previewing);
        assert_eq!(live.load(Ordering::SeqCst), 1);

        session.capture().unwrap();
        assert_eq!(session.state(), CaptureState::Captured);

        let image = session.begin_upload().unwrap();
        assert!(!image.bytes.is_empty());
        assert!(image.file_name.starts_with("capture_"));
        assert!(image.file_name.ends_with(".png"));

        session.finish_upload(true);
        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert!(session.image().is_none());
    }

    #[test]
    fn test_failed_upload_keeps_capture_for_retry() {
        let (mut session, live) = session_with_counter();
        session.open(Facing::Rear).unwrap();
        session.capture().unwrap();
        session.begin_upload().unwrap();

        session.finish_upload(false);
        assert_eq!(session.state(), CaptureState::Captured);
        assert!(session.image().is_some());
        // Stream still held: the session is not terminal yet.
        assert_eq!(live.load(Ordering::SeqCst), 1);

        session.cancel();
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_concurrent_submissions() {
        let (mut session, _) = session_with_counter();
        session.open(Facing::Rear).unwrap();
        session.capture().unwrap();

        session.begin_upload().unwrap();
        assert!(matches!(
            session.begin_upload(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_denied_camera_never_enters_preview() {
        let mut backend = FakeBackend::new();
        backend.deny = true;
        let live = Arc::clone(&backend.live_streams);
        let mut session = CaptureSession::new(Box::new(backend));

        assert!(session.open(Facing::Rear).is_err());
        assert_eq!(session.state(), CaptureState::Error);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_from_every_state_is_terminal() {
        let (mut session, live) = session_with_counter();
        session.cancel();
        assert_eq!(session.state(), CaptureState::Idle);

        session.open(Facing::Rear).unwrap();
        session.cancel();
        assert_eq!(live.load(Ordering::SeqCst), 0);

        session.open(Facing::Rear).unwrap();
        session.capture().unwrap();
        session.cancel();
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), CaptureState::Idle);
    }

    #[test]
    fn test_retake_returns_to_preview_without_reacquire() {
        let (mut session, live) = session_with_counter();
        session.open(Facing::Rear).unwrap();
        session.capture().unwrap();

        session.retake().unwrap();
        assert_eq!(session.state(), CaptureState::Previewing);
        assert!(session.image().is_none());
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_encode_still_fallback_dimensions() {
        let frame = Frame {
            width: 0,
            height: 0,
            rgba: Vec::new(),
        };
        let image = encode_still(&frame).unwrap();
        let decoded = image::load_from_memory(&image.bytes).unwrap();
        assert_eq!(decoded.width(), 640);
        assert_eq!(decoded.height(), 480);
        assert!(image.data_url.starts_with("data:image/png;base64,"));
    }
}
