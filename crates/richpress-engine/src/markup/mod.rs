/*!
 * # Content Markup Module
 *
 * The body content of a document is stored as a single markup string (the
 * same string that is embedded verbatim into the generated HTML document).
 * This module provides the typed view of that string and the tools to move
 * between the two representations:
 *
 * - **`lexer`**: Logos lexer splitting the markup into tags, entities and
 *   text runs. Lossless: every byte of the input appears in exactly one
 *   token, so concatenating token texts reproduces the input.
 * - **`types`**: the `Node` tree (text runs, inline style wrappers, line
 *   breaks, paragraphs, links, captioned figures).
 * - **`parser`**: tolerant tag-stream parser. Unknown container tags are
 *   transparent, unmatched closing tags are ignored, and containers left
 *   open at end of input are closed there.
 * - **`writer`**: canonical serialization of a `Node` tree, plain-text
 *   extraction, and the formatting stripper.
 * - **`fragment`**: builders for the fragments spliced in by the editor
 *   (captioned figure blocks and hyperlinks).
 *
 * Parsing never fails; malformed markup degrades to text runs instead of
 * errors. Text nodes keep their raw (entity-encoded) form so that a
 * parse/write round-trip preserves the original bytes of text content.
 */

pub mod fragment;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod writer;

pub use parser::parse;
pub use types::{InlineStyle, Node};
pub use writer::{plain_text, strip_formatting, write_nodes};
