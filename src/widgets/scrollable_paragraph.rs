use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollableParagraphState {
    pub content: String,
    pub scroll_offset_vertical: u16,
    // Inner size of the panel the paragraph is drawn in; zero until the first layout pass.
    pub width: u16,
    pub height: u16,
}

impl ScrollableParagraphState {
    pub fn new(content: String) -> Self {
        Self { content, ..Self::default() }
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.scroll_offset_vertical = 0; // Reset scroll when content changes
    }

    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll_offset_vertical = self.scroll_offset_vertical.min(self.max_scroll());
    }

    /// Lines the content occupies once wrapped to `width`. Approximates the
    /// word wrap with a character wrap, which never under-counts by more than
    /// a line per paragraph.
    pub fn wrapped_line_count(&self) -> u16 {
        if self.width == 0 {
            return self.content.lines().count() as u16;
        }
        let width = self.width as usize;
        let lines: usize = self
            .content
            .lines()
            .map(|line| UnicodeWidthStr::width(line).max(1).div_ceil(width))
            .sum();
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    pub fn max_scroll(&self) -> u16 {
        self.wrapped_line_count().saturating_sub(self.height)
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset_vertical = self.scroll_offset_vertical.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset_vertical =
            self.scroll_offset_vertical.saturating_add(amount).min(self.max_scroll());
    }
}
