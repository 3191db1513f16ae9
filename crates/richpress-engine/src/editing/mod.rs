/*!
 * # Editing Core Module
 *
 * The editing system keeps the entire body content in a single buffer and
 * funnels every mutation through an explicit command algebra:
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The content markup lives in one `xi_rope::Rope` buffer
 * - The buffer string is exactly what the generated document embeds, so
 *   there is no second representation to drift out of sync
 *
 * ### 2. Command-Based Editing
 * - All edits are `Cmd` values resolved to a single replacement and
 *   applied as a delta
 * - Each command carries its own deterministic cursor rule: a line break
 *   puts the caret after the `<br>`, an image insertion puts it inside
 *   the placeholder paragraph below the figure, a link insertion puts it
 *   after the anchor
 *
 * ### 3. Explicit Selection
 * - The selection is a byte range into the buffer, owned by the
 *   `Document` - not an ambient range object that dialogs can invalidate
 * - `SelectionTracker` snapshots it before toolbar actions and hands it
 *   back exactly once (`capture` / `consume` / `restore`)
 *
 * ### 4. Read API: Immutable Snapshots
 * - `ContentSnapshot` exposes the parsed node tree plus plain-text
 *   extraction without ever mutating the buffer
 *
 * ## Module Structure
 *
 * - **`document`**: the `Document` type with buffer, selection, version
 *   and pending-style state
 * - **`commands`**: the `Cmd` enum and command resolution
 * - **`selection`**: `SelectionState` and the at-most-once tracker
 * - **`snapshot`**: immutable parsed views
 * - **`patch`**: edit result metadata (changed ranges, new selection)
 */

pub mod commands;
pub mod document;
pub mod patch;
pub mod selection;
pub mod snapshot;

pub use commands::Cmd;
pub use document::Document;
pub use patch::Patch;
pub use selection::{SelectionState, SelectionTracker};
pub use snapshot::ContentSnapshot;
