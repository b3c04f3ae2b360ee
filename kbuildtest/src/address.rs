use std::fmt;

use kbuilder::Builder;

/// A location such as `https://example.com:8080/path (description)`.
#[derive(Builder, Debug, PartialEq, Eq)]
pub struct Address {
    #[into]
    pub protocol: String,
    #[into]
    pub url: String,
    pub port: Option<u16>,
    #[into]
    pub path: Option<String>,
    #[into]
    pub description: Option<String>,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.protocol, self.url)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

pub fn smoke_lines() -> Vec<String> {
    let google = AddressBuilder::builder()
        .protocol("https://")
        .url("google.com")
        .description("Google, what else?")
        .build();

    vec![format!("google: {}", google)]
}
