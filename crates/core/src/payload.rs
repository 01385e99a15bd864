use serde::Serialize;

use crate::types::NotificationContent;

pub const BOT_USERNAME: &str = "CI-Bot";
pub const BOT_ICON_EMOJI: &str = ":monkey_face:";
pub const AUTHOR_NAME: &str = "SonarQube";

/// Incoming-webhook message with a single attachment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationPayload {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title_link: String,
    pub text: String,
    pub author_name: String,
    pub mrkdwn_in: Vec<String>,
}

/// Where the notification points and what it is called.
#[derive(Debug, Clone, Default)]
pub struct Target<'a> {
    pub project_name: &'a str,
    pub channel: &'a str,
    pub dashboard_url: Option<&'a str>,
}

impl NotificationContent {
    /// Slack mrkdwn body. Absent values render as empty strings in place.
    pub fn body_text(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("*{}*\n", self.status));
        s.push_str(&format!("*{} bugs*\n", self.bugs));
        s.push_str(&format!("Technical debt: *{} days*\n", self.sqale_index));
        s.push_str(&format!(
            "Duplicated: *{} %*\n",
            self.duplicated_lines_density
        ));
        s.push_str(&format!("*{}* Code Smells\n", self.code_smells));
        s.push_str(&format!("Coverage: *{} %*", self.coverage));
        s
    }

    fn fallback_text(&self, project_name: &str) -> String {
        let status = if self.status.is_empty() {
            "UNKNOWN"
        } else {
            self.status.as_str()
        };
        format!(
            "{AUTHOR_NAME} {project_name}: {status}, {} bugs, {} code smells",
            self.bugs, self.code_smells
        )
    }
}

pub fn format_payload(content: &NotificationContent, target: &Target<'_>) -> NotificationPayload {
    let attachment = Attachment {
        fallback: content.fallback_text(target.project_name),
        color: content.color.clone(),
        title: format!("Review code: {}", target.project_name),
        title_link: target.dashboard_url.unwrap_or_default().to_string(),
        text: content.body_text(),
        author_name: AUTHOR_NAME.to_string(),
        mrkdwn_in: vec!["text".to_string()],
    };

    NotificationPayload {
        channel: target.channel.to_string(),
        username: BOT_USERNAME.to_string(),
        icon_emoji: BOT_ICON_EMOJI.to_string(),
        attachments: vec![attachment],
    }
}
