//! Authoring-session block list
//!
//! While a post is being edited the blocks carry a transient numeric id so
//! a reorder UI has something stable to key on. The id never reaches
//! storage: `persistable` is the only projection to the stored form.

use super::block::{BlockKind, ContentBlock};

/// A block as held by an editing session: the persisted block plus a
/// session-local id.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableBlock {
    pub id: u64,
    pub block: ContentBlock,
}

/// The working block sequence of one editing session.
#[derive(Debug, Default)]
pub struct Editor {
    blocks: Vec<EditableBlock>,
    next_id: u64,
}

impl Editor {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a stored block sequence, assigning fresh ids.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        let mut editor = Self::new();
        for block in blocks {
            let id = editor.fresh_id();
            editor.blocks.push(EditableBlock { id, block });
        }
        editor
    }

    /// Append an empty block of the given kind and return it.
    pub fn append(&mut self, kind: BlockKind) -> &EditableBlock {
        let id = self.fresh_id();
        self.blocks.push(EditableBlock {
            id,
            block: ContentBlock::new(kind),
        });
        self.blocks.last().expect("just pushed")
    }

    /// Move the block at `from` so it sits at `to`, keeping the relative
    /// order of every other block. Out-of-range indices are a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.blocks.len() || to >= self.blocks.len() || from == to {
            return;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
    }

    /// Remove the block at `index`. Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    /// Mutable access to a block's fields for form edits.
    pub fn block_mut(&mut self, index: usize) -> Option<&mut ContentBlock> {
        self.blocks.get_mut(index).map(|b| &mut b.block)
    }

    /// The working sequence, in display order.
    pub fn blocks(&self) -> &[EditableBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Project the sequence into its stored form, stripping session ids.
    pub fn persistable(&self) -> Vec<ContentBlock> {
        self.blocks.iter().map(|b| b.block.clone()).collect()
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::block::TrustedHtml;

    fn session_with(n: usize) -> Editor {
        let blocks = (0..n)
            .map(|i| ContentBlock::Paragraph {
                content: TrustedHtml::from_author(format!("p{}", i)),
            })
            .collect();
        Editor::from_blocks(blocks)
    }

    fn texts(editor: &Editor) -> Vec<String> {
        editor
            .blocks()
            .iter()
            .map(|b| b.block.text().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_append_defaults() {
        let mut editor = Editor::new();
        editor.append(BlockKind::Code);
        editor.append(BlockKind::Paragraph);
        assert_eq!(editor.len(), 2);
        match &editor.blocks()[0].block {
            ContentBlock::Code { language, .. } => assert_eq!(language, "python"),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut editor = session_with(3);
        editor.append(BlockKind::Heading);
        let mut ids: Vec<u64> = editor.blocks().iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_reorder_preserves_others() {
        let mut editor = session_with(4);
        editor.reorder(0, 2);
        assert_eq!(texts(&editor), vec!["p1", "p2", "p0", "p3"]);

        editor.reorder(3, 0);
        assert_eq!(texts(&editor), vec!["p3", "p1", "p2", "p0"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut editor = session_with(2);
        editor.reorder(0, 5);
        editor.reorder(7, 0);
        assert_eq!(texts(&editor), vec!["p0", "p1"]);
    }

    #[test]
    fn test_remove() {
        let mut editor = session_with(3);
        editor.remove(1);
        assert_eq!(texts(&editor), vec!["p0", "p2"]);
        editor.remove(9);
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_persistable_strips_ids_and_keeps_order() {
        let mut editor = session_with(2);
        editor.reorder(0, 1);
        let stored = editor.persistable();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].text(), Some("p1"));
        assert_eq!(stored[1].text(), Some("p0"));

        // The stored form serializes without any id field
        let json = serde_json::to_string(&stored).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_block_mut_edits_in_place() {
        let mut editor = Editor::new();
        editor.append(BlockKind::Heading);
        if let Some(ContentBlock::Heading { content, level }) = editor.block_mut(0) {
            *content = "Floorplanning".to_string();
            *level = 3;
        }
        match &editor.blocks()[0].block {
            ContentBlock::Heading { content, level } => {
                assert_eq!(content, "Floorplanning");
                assert_eq!(*level, 3);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
