use super::Token;

/// Scan direction for boundary jumps.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Next,
    Prev,
}

/// Sorted sentence and paragraph start positions of a token sequence.
///
/// A paragraph start always counts as a sentence start.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NavigationIndex {
    sentence_starts: Vec<usize>,
    paragraph_starts: Vec<usize>,
}

impl NavigationIndex {
    pub fn build(tokens: &[Token]) -> Self {
        let mut index = Self::default();

        for (position, token) in tokens.iter().enumerate() {
            if token.meta.paragraph_start {
                index.paragraph_starts.push(position);
            }
            if token.meta.sentence_start || token.meta.paragraph_start {
                index.sentence_starts.push(position);
            }
        }

        index
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_starts.len()
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraph_starts.len()
    }

    /// Nearest sentence start strictly after/before `from`.
    pub fn sentence_from(&self, from: usize, direction: Direction) -> Option<usize> {
        nearest(&self.sentence_starts, from, direction)
    }

    /// Nearest paragraph start strictly after/before `from`.
    pub fn paragraph_from(&self, from: usize, direction: Direction) -> Option<usize> {
        nearest(&self.paragraph_starts, from, direction)
    }

    /// Zero-based paragraph containing token `index`.
    pub fn paragraph_of(&self, index: usize) -> usize {
        self.paragraph_starts
            .partition_point(|start| *start <= index)
            .saturating_sub(1)
    }
}

fn nearest(starts: &[usize], from: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Next => {
            let pos = starts.partition_point(|start| *start <= from);
            starts.get(pos).copied()
        }
        Direction::Prev => {
            let pos = starts.partition_point(|start| *start < from);
            pos.checked_sub(1).map(|pos| starts[pos])
        }
    }
}
