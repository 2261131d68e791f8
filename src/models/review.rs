use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Emotion: Reviewer's verdict on a completed chore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Happy,
    #[default]
    Neutral,
    Upset,
    Mad,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [Emotion::Happy, Emotion::Neutral, Emotion::Upset, Emotion::Mad];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "HAPPY",
            Emotion::Neutral => "NEUTRAL",
            Emotion::Upset => "UPSET",
            Emotion::Mad => "MAD",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Neutral => "😐",
            Emotion::Upset => "😟",
            Emotion::Mad => "😠",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Happy => "Happy",
            Emotion::Neutral => "Neutral",
            Emotion::Upset => "Upset",
            Emotion::Mad => "Mad",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// CreateReviewParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewParams {
    pub reviewer_status: String,
    pub reviewer_comment: String,
}

impl CreateReviewParams {
    pub fn new(emotion: Emotion, comment: &str) -> Self {
        Self {
            reviewer_status: emotion.as_str().to_string(),
            reviewer_comment: comment.trim().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChoreReview: A submitted review as returned by the API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreReview {
    pub id: String,
    pub reviewer_id: String,
    #[serde(default)]
    pub reviewer_name: String,
    pub reviewer_status: String,
    #[serde(default)]
    pub review_comment: String,
    pub created_at: String,
}

impl ChoreReview {
    /// The reviewer status as an [`Emotion`], if it is one.
    pub fn emotion(&self) -> Option<Emotion> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == self.reviewer_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_carry_emotion_as_status() {
        let params = CreateReviewParams::new(Emotion::Upset, "  left crumbs ");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["reviewerStatus"], "UPSET");
        assert_eq!(json["reviewerComment"], "left crumbs");
    }

    #[test]
    fn review_status_maps_back_to_emotion() {
        let review: ChoreReview = serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "reviewerId": "alex",
            "reviewerName": "Alex",
            "reviewerStatus": "HAPPY",
            "reviewComment": "spotless",
            "createdAt": "2024-06-10T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(review.emotion(), Some(Emotion::Happy));
        assert_eq!(Emotion::default().to_string(), "Neutral");
    }
}
