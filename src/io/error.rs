use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to open input file `{path}`: {source}")]
    OpenInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input `{label}`: {source}")]
    ReadInput {
        label: String,
        #[source]
        source: std::io::Error,
    },
}
