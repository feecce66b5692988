impl Reader {
    pub fn jump_sentence(&mut self, direction: Direction, now_ms: u64) {
        self.dispatch(ReaderCommand::JumpSentence(direction), now_ms);
    }

    pub fn jump_sentences(&mut self, direction: Direction, count: usize, now_ms: u64) {
        self.dispatch(ReaderCommand::JumpSentences(direction, count), now_ms);
    }

    pub fn jump_paragraph(&mut self, direction: Direction, now_ms: u64) {
        self.dispatch(ReaderCommand::JumpParagraph(direction), now_ms);
    }

    /// Zero-based paragraph of the current token.
    pub fn current_paragraph(&self) -> usize {
        self.navigation.paragraph_of(self.current_index)
    }

    // Forward misses stay put, backward misses land on the first token.
    fn apply_jump_sentence(&mut self, direction: Direction) {
        match self.navigation.sentence_from(self.current_index, direction) {
            Some(index) => self.current_index = index,
            None if direction == Direction::Prev => self.current_index = 0,
            None => {}
        }
    }

    fn apply_jump_paragraph(&mut self, direction: Direction) {
        match self.navigation.paragraph_from(self.current_index, direction) {
            Some(index) => self.current_index = index,
            None if direction == Direction::Prev => self.current_index = 0,
            None => {}
        }
    }

    fn apply_jump_sentences(&mut self, direction: Direction, count: usize) {
        let mut index = self.current_index;
        let mut jumps = 0;

        while jumps < count {
            let Some(found) = self.navigation.sentence_from(index, direction) else {
                break;
            };
            index = found;
            jumps += 1;
        }

        if jumps == 0 && direction == Direction::Prev {
            index = 0;
        }
        self.current_index = index;
        self.unfinish();
    }
}
