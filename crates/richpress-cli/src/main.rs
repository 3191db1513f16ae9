use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use richpress_config::Config;
use richpress_engine::{FormatCommand, InsertionRequest, PastePayload, Session};
use std::io::stdout;

/// Scroll distance after which the back-to-top hint appears.
const TOP_HINT_AFTER: u16 = 10;

/// The metadata input fields plus the editor surface, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    MainCategoryName,
    MainCategoryUrl,
    SubCategoryName,
    SubCategoryUrl,
    TitleText,
    Editor,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::MainCategoryName,
        Focus::MainCategoryUrl,
        Focus::SubCategoryName,
        Focus::SubCategoryUrl,
        Focus::TitleText,
        Focus::Editor,
    ];

    fn next(self) -> Focus {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Focus {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            Focus::MainCategoryName => "主分類名稱 (純文字)",
            Focus::MainCategoryUrl => "主分類 URL (可選)",
            Focus::SubCategoryName => "次分類名稱 (純文字)",
            Focus::SubCategoryUrl => "次分類 URL (可選)",
            Focus::TitleText => "題目欄位 (純文字)",
            Focus::Editor => "回答欄位",
        }
    }
}

/// Which kind of two-field prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Image,
    Link,
    Color,
}

/// The two-field prompt dialog. Confirm yields the field values as a
/// typed request; cancel yields nothing. No stored callbacks.
struct Prompt {
    kind: PromptKind,
    title: &'static str,
    label1: &'static str,
    placeholder1: &'static str,
    label2: &'static str,
    placeholder2: &'static str,
    input1: String,
    input2: String,
    active: usize,
}

impl Prompt {
    fn image() -> Self {
        Self {
            kind: PromptKind::Image,
            title: "插入圖片",
            label1: "圖片網址:",
            placeholder1: "例如：https://example.com/image.jpg",
            label2: "圖片說明 (可選):",
            placeholder2: "例如：美麗的風景",
            input1: String::new(),
            input2: String::new(),
            active: 0,
        }
    }

    fn link() -> Self {
        Self {
            kind: PromptKind::Link,
            title: "插入超連結",
            label1: "連結網址:",
            placeholder1: "例如：https://google.com",
            label2: "連結文字 (可選，如果沒有選擇文字):",
            placeholder2: "例如：點擊這裡",
            input1: String::new(),
            input2: String::new(),
            active: 0,
        }
    }

    fn color() -> Self {
        Self {
            kind: PromptKind::Color,
            title: "文字顏色",
            label1: "顏色值:",
            placeholder1: "例如：#ff0000",
            label2: "",
            placeholder2: "",
            input1: String::new(),
            input2: String::new(),
            active: 0,
        }
    }

    fn active_input(&mut self) -> &mut String {
        if self.active == 0 {
            &mut self.input1
        } else {
            &mut self.input2
        }
    }

    fn has_second_field(&self) -> bool {
        !self.label2.is_empty()
    }
}

enum Modal {
    None,
    Prompt(Prompt),
    Message(String),
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Compose,
    Output,
}

struct App {
    session: Session,
    config: Config,
    focus: Focus,
    modal: Modal,
    view: View,
    /// Selection anchor while extending with Shift+arrows.
    sel_anchor: Option<usize>,
    /// Scroll offset of the output view.
    output_scroll: u16,
    quit: bool,
}

impl App {
    fn new(config: Config) -> Self {
        let mut session = Session::new();
        session.focus_editor();
        Self {
            session,
            config,
            focus: Focus::Editor,
            modal: Modal::None,
            view: View::Compose,
            sel_anchor: None,
            output_scroll: 0,
            quit: false,
        }
    }

    fn message(&mut self, text: impl Into<String>) {
        self.modal = Modal::Message(text.into());
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sel_anchor = None;
        if focus == Focus::Editor {
            self.session.focus_editor();
        } else {
            self.session.blur_editor();
        }
    }

    fn field_value_mut(&mut self, focus: Focus) -> Option<&mut String> {
        let meta = self.session.metadata_mut();
        match focus {
            Focus::MainCategoryName => Some(&mut meta.main_category_name),
            Focus::MainCategoryUrl => Some(&mut meta.main_category_url),
            Focus::SubCategoryName => Some(&mut meta.sub_category_name),
            Focus::SubCategoryUrl => Some(&mut meta.sub_category_url),
            Focus::TitleText => Some(&mut meta.title_text),
            Focus::Editor => None,
        }
    }

    fn field_value(&self, focus: Focus) -> String {
        let meta = self.session.metadata();
        match focus {
            Focus::MainCategoryName => meta.main_category_name.clone(),
            Focus::MainCategoryUrl => meta.main_category_url.clone(),
            Focus::SubCategoryName => meta.sub_category_name.clone(),
            Focus::SubCategoryUrl => meta.sub_category_url.clone(),
            Focus::TitleText => meta.title_text.clone(),
            Focus::Editor => String::new(),
        }
    }

    // === Editor caret movement ===

    fn move_caret(&mut self, forward: bool, extend: bool) {
        let doc = self.session.document();
        let text = doc.text();
        let sel = doc.selection();
        let caret = if forward { sel.end } else { sel.start };

        let new = if forward {
            next_char_boundary(&text, caret)
        } else {
            prev_char_boundary(&text, caret)
        };

        if extend {
            let anchor = *self.sel_anchor.get_or_insert(if forward {
                sel.start
            } else {
                sel.end
            });
            self.session.set_selection(anchor, new);
        } else {
            self.sel_anchor = None;
            self.session.set_selection(new, new);
        }
    }

    // === Actions ===

    fn open_prompt(&mut self, prompt: Prompt) {
        // Opening the dialog steals focus: capture the selection first
        self.session.save_selection();
        self.session.blur_editor();
        self.modal = Modal::Prompt(prompt);
    }

    fn confirm_prompt(&mut self, prompt: Prompt) {
        match prompt.kind {
            PromptKind::Image => {
                self.session.insert_fragment(InsertionRequest::Image {
                    url: prompt.input1,
                    caption: prompt.input2,
                });
            }
            PromptKind::Link => {
                self.session.insert_fragment(InsertionRequest::Link {
                    url: prompt.input1,
                    display_text: prompt.input2,
                });
            }
            PromptKind::Color => {
                if !prompt.input1.is_empty() {
                    self.session
                        .apply_format(FormatCommand::ForeColor(prompt.input1));
                }
            }
        }
        self.set_focus(Focus::Editor);
    }

    fn generate(&mut self) {
        self.session.generate();
        self.output_scroll = 0;
        self.view = View::Output;
    }

    fn write_output(&mut self) {
        match self.session.generated() {
            Some(html) => match std::fs::write(&self.config.output_path, html) {
                Ok(()) => {
                    self.message(format!(
                        "HTML + CSS 程式碼已寫入 {}",
                        self.config.output_path.display()
                    ));
                }
                Err(e) => {
                    log::warn!("failed to write output file: {e}");
                    self.message(format!("寫入失敗：{e}"));
                }
            },
            None => self.message("沒有可複製的程式碼。請先產生 HTML。"),
        }
    }

    fn export_snapshot(&mut self) {
        let result = self.session.export_snapshot().and_then(|json| {
            if let Some(parent) = self.config.snapshot_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.config.snapshot_path, json)?;
            Ok(())
        });
        match result {
            Ok(()) => self.message(format!(
                "設定已匯出為 {}",
                self.config.snapshot_path.display()
            )),
            Err(e) => {
                log::warn!("snapshot export failed: {e}");
                self.message(format!("匯出失敗：{e}"));
            }
        }
    }

    fn import_snapshot(&mut self) {
        let json = match std::fs::read_to_string(&self.config.snapshot_path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("snapshot read failed: {e}");
                self.message(format!("載入設定失敗：{e}"));
                return;
            }
        };
        match self.session.import_snapshot(&json) {
            Ok(()) => self.message("設定已成功匯入！"),
            Err(e) => {
                // Recoverable: in-memory state is untouched
                log::warn!("snapshot import failed: {e}");
                self.message("載入設定失敗：無效的 JSON 檔案。");
            }
        }
    }
}

fn prev_char_boundary(text: &str, at: usize) -> usize {
    if at == 0 {
        return 0;
    }
    let mut i = at - 1;
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    if at >= text.len() {
        return text.len();
    }
    let mut i = at + 1;
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("config load failed, using defaults: {e}");
            Config::default()
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) => handle_key(app, key.code, key.modifiers),
            Event::Paste(text) => {
                if matches!(app.modal, Modal::None)
                    && app.view == View::Compose
                    && app.focus == Focus::Editor
                {
                    app.session.paste(&PastePayload::plain(text));
                }
            }
            _ => {}
        }

        if app.quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Modal input comes first; one overlay at a time
    match std::mem::replace(&mut app.modal, Modal::None) {
        Modal::Message(_) => return, // any key dismisses
        Modal::ConfirmClear => {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.session.clear_all();
                    app.view = View::Compose;
                    app.message("所有內容已清空！");
                }
                _ => {}
            }
            return;
        }
        Modal::Prompt(mut prompt) => {
            match code {
                KeyCode::Esc => {
                    // Cancel: nothing is inserted, focus returns to the editor
                    app.set_focus(Focus::Editor);
                }
                KeyCode::Enter => app.confirm_prompt(prompt),
                KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                    if prompt.has_second_field() {
                        prompt.active = 1 - prompt.active;
                    }
                    app.modal = Modal::Prompt(prompt);
                }
                KeyCode::Backspace => {
                    prompt.active_input().pop();
                    app.modal = Modal::Prompt(prompt);
                }
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    prompt.active_input().push(c);
                    app.modal = Modal::Prompt(prompt);
                }
                _ => app.modal = Modal::Prompt(prompt),
            }
            return;
        }
        Modal::None => {}
    }

    // Global keys
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('q') {
        app.quit = true;
        return;
    }

    match app.view {
        View::Output => handle_output_key(app, code),
        View::Compose => handle_compose_key(app, code, modifiers),
    }
}

fn handle_output_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.view = View::Compose,
        KeyCode::Up => app.output_scroll = app.output_scroll.saturating_sub(1),
        KeyCode::Down => app.output_scroll = app.output_scroll.saturating_add(1),
        KeyCode::PageUp => app.output_scroll = app.output_scroll.saturating_sub(20),
        KeyCode::PageDown => app.output_scroll = app.output_scroll.saturating_add(20),
        // Back to top, mirroring the scroll-to-top control
        KeyCode::Char('t') | KeyCode::Home => app.output_scroll = 0,
        KeyCode::Char('w') => app.write_output(),
        _ => {}
    }
}

fn handle_compose_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Action keys available everywhere in the compose view
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('g') => return app.generate(),
            KeyCode::Char('s') => return app.export_snapshot(),
            KeyCode::Char('o') => return app.import_snapshot(),
            KeyCode::Char('x') => {
                app.modal = Modal::ConfirmClear;
                return;
            }
            KeyCode::Char('w') => return app.write_output(),
            _ => {}
        }
    }

    match code {
        KeyCode::Tab => return app.set_focus(app.focus.next()),
        KeyCode::BackTab => return app.set_focus(app.focus.prev()),
        _ => {}
    }

    if app.focus == Focus::Editor {
        handle_editor_key(app, code, modifiers);
    } else if let Some(value) = app.field_value_mut(app.focus) {
        match code {
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => {}
        }
    }
}

fn handle_editor_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            // Toolbar: capture the selection, then apply over it
            KeyCode::Char('b') => {
                app.session.save_selection();
                app.session.apply_format(FormatCommand::Bold);
            }
            KeyCode::Char('i') => {
                app.session.save_selection();
                app.session.apply_format(FormatCommand::Italic);
            }
            KeyCode::Char('u') => {
                app.session.save_selection();
                app.session.apply_format(FormatCommand::Underline);
            }
            KeyCode::Char('r') => {
                app.session.save_selection();
                app.session.apply_format(FormatCommand::RemoveFormat);
            }
            KeyCode::Char('f') => app.open_prompt(Prompt::color()),
            KeyCode::Char('e') => app.open_prompt(Prompt::image()),
            KeyCode::Char('l') => app.open_prompt(Prompt::link()),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char(c) => {
            app.sel_anchor = None;
            app.session.type_text(&c.to_string());
        }
        KeyCode::Enter => {
            // Paragraph-break key: explicit line break, not a new paragraph
            app.sel_anchor = None;
            app.session.insert_line_break();
        }
        KeyCode::Backspace => {
            app.sel_anchor = None;
            app.session.delete_backward();
        }
        KeyCode::Left => app.move_caret(false, modifiers.contains(KeyModifiers::SHIFT)),
        KeyCode::Right => app.move_caret(true, modifiers.contains(KeyModifiers::SHIFT)),
        KeyCode::Home => {
            app.sel_anchor = None;
            app.session.set_selection(0, 0);
        }
        KeyCode::End => {
            app.sel_anchor = None;
            let end = app.session.document().len();
            app.session.set_selection(end, end);
        }
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    match app.view {
        View::Compose => draw_compose(f, app),
        View::Output => draw_output(f, app),
    }

    match &app.modal {
        Modal::None => {}
        Modal::Prompt(prompt) => draw_prompt(f, prompt),
        Modal::Message(text) => draw_message(f, text),
        Modal::ConfirmClear => draw_message(f, "清空所有內容？ (y/n)"),
    }
}

fn draw_compose(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // main category row
                Constraint::Length(3), // sub category row
                Constraint::Length(3), // title row
                Constraint::Min(6),    // editor
                Constraint::Length(2), // help
            ]
            .as_ref(),
        )
        .split(f.area());

    let main_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);
    let sub_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    draw_field(f, app, Focus::MainCategoryName, main_row[0]);
    draw_field(f, app, Focus::MainCategoryUrl, main_row[1]);
    draw_field(f, app, Focus::SubCategoryName, sub_row[0]);
    draw_field(f, app, Focus::SubCategoryUrl, sub_row[1]);
    draw_field(f, app, Focus::TitleText, chunks[2]);
    draw_editor(f, app, chunks[3]);

    let help = Paragraph::new(vec![
        Line::from(
            "^B 粗體 | ^I 斜體 | ^U 底線 | ^F 顏色 | ^R 清除格式 | ^E 插入圖片 | ^L 插入超連結",
        ),
        Line::from("^G 產生 HTML | ^S 匯出 | ^O 匯入 | ^X 清空 | ^W 寫出 | ^Q 離開 | Tab 切換欄位"),
    ]);
    f.render_widget(help, chunks[4]);
}

fn draw_field(f: &mut Frame, app: &App, field: Focus, area: Rect) {
    let focused = app.focus == field;
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut value = app.field_value(field);
    if focused {
        value.push('▎');
    }
    let widget = Paragraph::new(value)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(field.label()));
    f.render_widget(widget, area);
}

fn draw_editor(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let doc = app.session.document();
    let text = doc.text();
    let sel = doc.selection();

    // Visual caret / selection markers spliced into the displayed markup
    let mut display = String::with_capacity(text.len() + 6);
    display.push_str(&text[..sel.start]);
    if sel.is_empty() {
        display.push('▎');
        display.push_str(&text[sel.start..]);
    } else {
        display.push('⟦');
        display.push_str(&text[sel.clone()]);
        display.push('⟧');
        display.push_str(&text[sel.end..]);
    }

    let title = format!(
        "{} — 游標 {}..{} (所見即所得編輯器)",
        Focus::Editor.label(),
        sel.start,
        sel.end
    );
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(display)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title).style(style));
    f.render_widget(widget, area);
}

fn draw_output(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.area());

    let html = app.session.generated().unwrap_or("");
    let lines: Vec<Line> = html.lines().map(|l| Line::from(l.to_string())).collect();

    // The back-to-top control appears only once scrolled down far enough
    let title = if app.output_scroll > TOP_HINT_AFTER {
        "產生的 HTML + CSS 程式碼 — ↑ 回到頂部 (t)"
    } else {
        "產生的 HTML + CSS 程式碼"
    };

    let widget = Paragraph::new(lines)
        .scroll((app.output_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, chunks[0]);

    let help = Paragraph::new(Line::from(
        "↑/↓ 捲動 | t 回到頂部 | w 寫出檔案 | Esc 返回編輯",
    ));
    f.render_widget(help, chunks[1]);
}

fn draw_prompt(f: &mut Frame, prompt: &Prompt) {
    let area = centered_rect(60, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            prompt.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(prompt.label1),
        input_line(&prompt.input1, prompt.placeholder1, prompt.active == 0),
    ];
    if prompt.has_second_field() {
        lines.push(Line::from(prompt.label2));
        lines.push(input_line(
            &prompt.input2,
            prompt.placeholder2,
            prompt.active == 1,
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Enter 確定 · Esc 取消 · Tab 切換欄位"));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn input_line<'a>(value: &'a str, placeholder: &'a str, active: bool) -> Line<'a> {
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    if value.is_empty() {
        Line::from(vec![
            Span::styled(if active { "> " } else { "  " }, style),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(if active { "> " } else { "  " }, style),
            Span::styled(value, style),
        ])
    }
}

fn draw_message(f: &mut Frame, text: &str) {
    let area = centered_rect(50, f.area());
    f.render_widget(Clear, area);
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("訊息"));
    f.render_widget(widget, area);
}

fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ]
            .as_ref(),
        )
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1]);
    horizontal[1]
}
