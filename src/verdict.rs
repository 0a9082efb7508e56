// src/verdict.rs
//! Maps a reviewed submission to the chat message announcing its verdict.

use std::str::FromStr;

use crate::error::PollError;
use crate::review::SubmissionRecord;

/// Review outcomes we know how to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 2] = [ReviewStatus::Approved, ReviewStatus::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => {
                "The reviewer liked everything, you can move on to the next lesson."
            }
            ReviewStatus::Rejected => "Unfortunately, the reviewer found errors in the work.",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReviewStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or(())
    }
}

/// Render the notification for `record`.
///
/// Unknown statuses are an error rather than a fallback text, so a change in the
/// review API's vocabulary shows up in the logs instead of as a misleading message.
pub fn translate(record: &SubmissionRecord) -> Result<String, PollError> {
    let status: ReviewStatus =
        record
            .status
            .parse()
            .map_err(|_| PollError::UnknownStatus {
                name: record.homework_name.clone(),
                status: record.status.clone(),
            })?;

    Ok(format!(
        "Your work \"{}\" has been reviewed!\n\n{}",
        record.homework_name,
        status.verdict()
    ))
}
