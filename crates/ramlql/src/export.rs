pub mod sdl;

use std::fmt;

use ramlql_core::schema::TypeGraph;

/// A renderer of finished type graphs.
pub trait Exporter {
    fn export_type_graph(&self, graph: &TypeGraph) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Fmt(fmt::Error),
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Fmt(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Fmt(err) => write!(f, "Formatting error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Fmt(err) => Some(err),
        }
    }
}
