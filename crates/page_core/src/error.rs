use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageUrlError {
    #[error("invalid page url '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("page url '{url}' cannot carry endpoint paths")]
    CannotBeBase { url: String },
}
