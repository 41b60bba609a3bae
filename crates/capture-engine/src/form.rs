//! The external form-submission seam.
//!
//! The CRUD shell owns the form; the capture engine's only interaction with
//! it is attaching one finished video file and requesting submission.

use podium_common::PodiumResult;
use podium_media::RecordedFile;

/// The external record form the finished recording is handed to.
pub trait SubmissionForm: Send {
    /// Attach the recording to the form's video upload field.
    fn attach_video(&mut self, file: RecordedFile) -> PodiumResult<()>;

    /// Request submission of the form.
    fn request_submit(&mut self) -> PodiumResult<()>;
}
