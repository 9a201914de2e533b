use std::fmt;

use bollard::models::{ContainerInspectResponse, ContainerSummary as DockerSummary};

/// Length of the abbreviated container id shown to users.
pub const SHORT_ID_LEN: usize = 12;

/// Lifecycle state of a container as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Restarting,
    Created,
    Dead,
    Unknown,
}

impl ContainerStatus {
    /// Map a Docker state string. Anything unrecognised (including "removing") is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => ContainerStatus::Running,
            "exited" => ContainerStatus::Exited,
            "paused" => ContainerStatus::Paused,
            "restarting" => ContainerStatus::Restarting,
            "created" => ContainerStatus::Created,
            "dead" => ContainerStatus::Dead,
            _ => ContainerStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Running => "running",
            ContainerStatus::Exited => "exited",
            ContainerStatus::Paused => "paused",
            ContainerStatus::Restarting => "restarting",
            ContainerStatus::Created => "created",
            ContainerStatus::Dead => "dead",
            ContainerStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one container, valid for a single request.
///
/// Missing upstream fields become empty strings; a missing state becomes `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
}

impl ContainerSummary {
    pub fn new(id: &str, name: &str, image: &str, status: ContainerStatus) -> Self {
        Self {
            id: id.to_string(),
            short_id: short_id(id),
            name: name.to_string(),
            image: image.to_string(),
            status,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }
}

/// A container resolved by name or id, ready for a lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    pub id: String,
    pub name: String,
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

fn strip_slash(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

impl From<DockerSummary> for ContainerSummary {
    fn from(s: DockerSummary) -> Self {
        let id = s.id.unwrap_or_default();
        Self {
            short_id: short_id(&id),
            name: s.names.as_deref()
                .and_then(|n| n.first())
                .map(|n| strip_slash(n))
                .unwrap_or_default(),
            image: s.image.unwrap_or_default(),
            status: s.state
                .map(|state| ContainerStatus::parse(&state.to_string()))
                .unwrap_or(ContainerStatus::Unknown),
            id,
        }
    }
}

impl From<ContainerInspectResponse> for ContainerHandle {
    fn from(details: ContainerInspectResponse) -> Self {
        Self {
            id: details.id.unwrap_or_default(),
            name: details.name
                .map(|n| strip_slash(&n))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_takes_twelve_chars() {
        assert_eq!(short_id("abc123456789deadbeef"), "abc123456789");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ContainerStatus::parse("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::parse("Exited"), ContainerStatus::Exited);
        assert_eq!(ContainerStatus::parse("paused"), ContainerStatus::Paused);
        assert_eq!(ContainerStatus::parse("restarting"), ContainerStatus::Restarting);
        assert_eq!(ContainerStatus::parse("created"), ContainerStatus::Created);
        assert_eq!(ContainerStatus::parse("dead"), ContainerStatus::Dead);
        assert_eq!(ContainerStatus::parse("removing"), ContainerStatus::Unknown);
        assert_eq!(ContainerStatus::parse(""), ContainerStatus::Unknown);
    }

    #[test]
    fn test_status_display_round_trips() {
        for status in [
            ContainerStatus::Running,
            ContainerStatus::Exited,
            ContainerStatus::Paused,
            ContainerStatus::Restarting,
            ContainerStatus::Created,
            ContainerStatus::Dead,
        ] {
            assert_eq!(ContainerStatus::parse(&status.to_string()), status);
        }
    }

    #[test]
    fn test_summary_from_bollard() {
        let raw = DockerSummary {
            id: Some("abc123456789ffffffff".to_string()),
            names: Some(vec!["/web".to_string(), "/alias".to_string()]),
            image: Some("nginx".to_string()),
            ..Default::default()
        };
        let summary = ContainerSummary::from(raw);
        assert_eq!(summary.id, "abc123456789ffffffff");
        assert_eq!(summary.short_id, "abc123456789");
        assert_eq!(summary.name, "web");
        assert_eq!(summary.image, "nginx");
        assert_eq!(summary.status, ContainerStatus::Unknown);
    }

    #[test]
    fn test_summary_from_empty_bollard_record() {
        let summary = ContainerSummary::from(DockerSummary::default());
        assert_eq!(summary.id, "");
        assert_eq!(summary.short_id, "");
        assert_eq!(summary.name, "");
        assert_eq!(summary.image, "");
        assert_eq!(summary.status, ContainerStatus::Unknown);
    }

    #[test]
    fn test_handle_from_inspect() {
        let details = ContainerInspectResponse {
            id: Some("abc".to_string()),
            name: Some("/web".to_string()),
            ..Default::default()
        };
        let handle = ContainerHandle::from(details);
        assert_eq!(handle, ContainerHandle { id: "abc".to_string(), name: "web".to_string() });
    }
}
