//! Liverate API endpoint table.

use std::fmt;

use rest_client::HttpMethod;

/// The five Liverate API endpoints, each bound to a fixed path and method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// POST rate/save
    SaveRating,
    /// GET rate/get
    GetRating,
    /// POST feedback/save
    SaveFeedback,
    /// GET feedback/get
    GetFeedbacks,
    /// GET object/list
    ListObjects,
}

impl Endpoint {
    /// Every endpoint, in table order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::SaveRating,
        Endpoint::GetRating,
        Endpoint::SaveFeedback,
        Endpoint::GetFeedbacks,
        Endpoint::ListObjects,
    ];

    /// Path relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::SaveRating => "rate/save",
            Self::GetRating => "rate/get",
            Self::SaveFeedback => "feedback/save",
            Self::GetFeedbacks => "feedback/get",
            Self::ListObjects => "object/list",
        }
    }

    /// HTTP method the endpoint expects.
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::SaveRating | Self::SaveFeedback => HttpMethod::Post,
            Self::GetRating | Self::GetFeedbacks | Self::ListObjects => HttpMethod::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        let table: Vec<_> = Endpoint::ALL
            .iter()
            .map(|e| (e.path(), e.method()))
            .collect();

        assert_eq!(
            table,
            vec![
                ("rate/save", HttpMethod::Post),
                ("rate/get", HttpMethod::Get),
                ("feedback/save", HttpMethod::Post),
                ("feedback/get", HttpMethod::Get),
                ("object/list", HttpMethod::Get),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::SaveFeedback.to_string(), "POST feedback/save");
        assert_eq!(Endpoint::ListObjects.to_string(), "GET object/list");
    }
}
