// Request metadata that travels alongside a submission body

/// Incidental request data the validator may fold into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionMeta {
    /// Client IP as resolved through trusted proxy hops (or the socket peer).
    pub client_ip: Option<String>,
    /// Raw `User-Agent` header, if sent.
    pub user_agent: Option<String>,
}
