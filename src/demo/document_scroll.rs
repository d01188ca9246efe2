/// Row-granular scroll position over a document of `lines` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentScroll {
    pub offset: u32,
    pub max_offset: u32,
    pub viewport_rows: u32,
    pub lines: u32,
}

impl DocumentScroll {
    pub fn new(lines: u32) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn update_bounds(&mut self, viewport_rows: u32) {
        self.viewport_rows = viewport_rows;
        self.max_offset = self.lines.saturating_sub(viewport_rows);
        self.offset = self.offset.min(self.max_offset);
    }

    pub fn scroll_down(&mut self, rows: u32) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset);
    }

    pub fn scroll_up(&mut self, rows: u32) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn page_down(&mut self) {
        self.scroll_down((self.viewport_rows / 2).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up((self.viewport_rows / 2).max(1));
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.offset = self.max_offset;
    }
}
