use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DnsHintResponse {
    pub servers: Vec<String>,
}
