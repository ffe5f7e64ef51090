#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("graph contains duplicate node id: {id}")]
    DuplicateNode { id: String },
    #[error("graph contains an edge with a missing endpoint: {from} -> {to}")]
    MissingEndpoint { from: String, to: String },
    #[error("graph contains a cycle through node: {id}")]
    Cycle { id: String },
    #[error("layout option `{option}` is out of range: {reason}")]
    OptionOutOfRange {
        option: &'static str,
        reason: String,
    },
}

impl Error {
    /// The input graph itself is unusable (duplicate ids, dangling edges, cycles).
    pub fn is_invalid_graph(&self) -> bool {
        matches!(
            self,
            Error::DuplicateNode { .. } | Error::MissingEndpoint { .. } | Error::Cycle { .. }
        )
    }

    /// The options were rejected before any layout work started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::OptionOutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
