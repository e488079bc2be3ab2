//! File-level configuration of the decoder.

use crate::decoder::parser::SolutionParser;
use crate::decoder::stream::{NodeStream, StreamedNode};
use crate::model::{Header, Schema, SolutionTree};
use crate::parser::{BufferedByteSource, ByteParser, FormatError, InMemoryByteSource};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File size threshold (in bytes) for [ReadStrategy::Automatic].
/// Files smaller than this are read into memory; larger files use buffered I/O.
const AUTO_IN_MEMORY_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MB

/// Controls how the file is read during decoding.
///
/// By default, the [SolutionReaderBuilder] uses [ReadStrategy::Automatic],
/// which picks a strategy based on file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// Read the file in chunks through a buffered I/O reader.
    Buffered,

    /// Load the entire file into a contiguous byte buffer before parsing.
    InMemory,

    /// Automatically choose between [ReadStrategy::Buffered] and
    /// [ReadStrategy::InMemory] based on file size.
    /// This is the default.
    #[default]
    Automatic,
}

// =#========================================================================#=
// SOLUTION READER BUILDER
// =#========================================================================$=
/// Builder for decoding a solution file.
///
/// # Configuration Options
/// * **Read strategy**:
///   - [`with_buffered_source()`](Self::with_buffered_source)
///   - [`with_in_memory_source()`](Self::with_in_memory_source)
///   - Default: [ReadStrategy::Automatic]
/// * **Schema**: [`with_schema()`](Self::with_schema) rejects files whose
///   node lines follow the other schema
///
/// # Decoding mode
/// * [`build_tree()`](Self::build_tree) - materialize the whole [SolutionTree]
/// * [`stream()`](Self::stream) - obtain a [FileNodeStream] yielding nodes
///   in pre-order, for files too large to hold in memory
///
/// # Example
/// ```no_run
/// use soltree::decoder::SolutionReaderBuilder;
///
/// let mut max_depth = 0;
/// for node in SolutionReaderBuilder::for_file("4x4.txt").with_buffered_source().stream()? {
///     max_depth = max_depth.max(node?.depth);
/// }
/// println!("Deepest line of play: {max_depth} plies");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SolutionReaderBuilder {
    path: PathBuf,
    read_strategy: ReadStrategy,
    parser: SolutionParser,
}

impl SolutionReaderBuilder {
    /// Creates a new builder for a file, with default settings.
    ///
    /// The file is not touched until [build_tree()](Self::build_tree) or
    /// [stream()](Self::stream) is called.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        SolutionReaderBuilder {
            path: path.as_ref().to_path_buf(),
            read_strategy: ReadStrategy::default(),
            parser: SolutionParser::new(),
        }
    }

    /// Configures reading the file in chunks (buffered I/O).
    pub fn with_buffered_source(mut self) -> Self {
        self.read_strategy = ReadStrategy::Buffered;
        self
    }

    /// Configures loading the entire file into memory before parsing.
    pub fn with_in_memory_source(mut self) -> Self {
        self.read_strategy = ReadStrategy::InMemory;
        self
    }

    pub fn with_read_strategy(mut self, read_strategy: ReadStrategy) -> Self {
        self.read_strategy = read_strategy;
        self
    }

    /// Requires every node line to follow `schema`.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.parser = self.parser.with_schema(schema);
        self
    }

    pub fn read_strategy(&self) -> ReadStrategy {
        self.read_strategy
    }

    /// Decodes the whole file into a [SolutionTree].
    ///
    /// # Errors
    /// Returns a [FormatError] if the file cannot be read or is malformed.
    pub fn build_tree(self) -> Result<SolutionTree, FormatError> {
        if self.use_buffered() {
            self.parser
                .decode(ByteParser::from_file_buffered(&self.path)?)
        } else {
            self.parser
                .decode(ByteParser::from_file_in_memory(&self.path)?)
        }
    }

    /// Reads the header and returns a stream over the nodes of the file.
    ///
    /// # Errors
    /// Returns a [FormatError] if the file cannot be read or the header
    /// is malformed.
    pub fn stream(self) -> Result<FileNodeStream, FormatError> {
        if self.use_buffered() {
            let byte_parser = ByteParser::from_file_buffered(&self.path)?;
            Ok(FileNodeStream::Buffered(self.parser.into_stream(byte_parser)?))
        } else {
            let byte_parser = ByteParser::from_file_in_memory(&self.path)?;
            Ok(FileNodeStream::InMemory(self.parser.into_stream(byte_parser)?))
        }
    }

    fn use_buffered(&self) -> bool {
        let use_buffered = match self.read_strategy {
            ReadStrategy::Buffered => true,
            ReadStrategy::InMemory => false,
            ReadStrategy::Automatic => {
                let file_size = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
                file_size >= AUTO_IN_MEMORY_THRESHOLD
            }
        };
        debug!(path = %self.path.display(), use_buffered, "opening solution file");
        use_buffered
    }
}

// =#========================================================================#=
// FILE NODE STREAM
// =#========================================================================$=
/// [NodeStream] over a file, with the byte source chosen by the
/// [ReadStrategy].
#[allow(clippy::large_enum_variant)]
pub enum FileNodeStream {
    /// Stream with buffered file read
    Buffered(NodeStream<BufferedByteSource<File>>),
    /// Stream with in-memory file read
    InMemory(NodeStream<InMemoryByteSource>),
}

/// Helper macro to delegate a method call to the inner stream variant.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            FileNodeStream::Buffered(inner) => inner.$method($($arg),*),
            FileNodeStream::InMemory(inner) => inner.$method($($arg),*),
        }
    };
}

impl FileNodeStream {
    pub fn header(&self) -> Header {
        delegate!(self, header)
    }

    /// See [NodeStream::schema].
    pub fn schema(&self) -> Option<Schema> {
        delegate!(self, schema)
    }

    pub fn num_nodes(&self) -> usize {
        delegate!(self, num_nodes)
    }

    pub fn line(&self) -> usize {
        delegate!(self, line)
    }
}

impl Iterator for FileNodeStream {
    type Item = Result<StreamedNode, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        delegate!(self, next)
    }
}
