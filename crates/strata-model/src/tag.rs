use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Association of a worker with a labeled tag inside a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTag {
    pub id: i64,
    pub cluster_id: i64,
    pub tag: String,
    pub worker_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_rows() {
        let json = r#"{
            "id": 7,
            "clusterId": 1,
            "tag": "ssd",
            "workerId": "10.0.0.1:9097:9098:9099:9100",
            "createdAt": "2024-03-01T10:00:00Z",
            "modifiedAt": "2024-03-02T10:00:00Z"
        }"#;
        let tag: ClusterTag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.cluster_id, 1);
        assert_eq!(tag.tag, "ssd");
        assert!(tag.modified_at > tag.created_at);
    }
}
