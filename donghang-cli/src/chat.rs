use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::path::PathBuf;

use donghang_core::{
    ChatSession, ExpenseParser, ParsedExpense, Route, WELFARE_PORTAL_URL, WelfareCategory,
    WelfareService, fallback_services, format_won, local_hour, route_message, today_in,
};
use donghang_ledger::{ExpenseApiClient, ExpenseRecord, OfflineQueue, assess, average_amount};

use crate::config::{self, Config};
use crate::state::{self, Profile};
use crate::{ai, auth, fallback};

#[derive(Clone, Debug)]
struct Msg {
    role: Role,
    content: String,
}

#[derive(Clone, Debug)]
enum Role {
    User,
    Assistant,
    System,
}

struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today() -> Result<Self> {
        let home = state::ensure_donghang_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    fn append_user(&mut self, msg: &str) -> Result<()> {
        self.append("user", msg)
    }

    fn append_assistant(&mut self, msg: &str) -> Result<()> {
        self.append("assistant", msg)
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

pub fn run_chat() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let cfg = config::load_config()?;
    let profile = state::read_profile()?;
    let parser = ExpenseParser::interactive()?;
    let queue = OfflineQueue::open(state::ensure_donghang_home()?)?;
    let mut session = ChatSession::new();

    let mut messages: Vec<Msg> = vec![Msg {
        role: Role::Assistant,
        content: "안녕하세요, 금복이에요! 소비 내역을 말씀해주시거나 '오늘 뭐할까?'라고 물어보세요."
            .to_string(),
    }];

    let mut input = String::new();
    let mut show_help = true;

    // daily log file
    let mut log = ChatLog::open_today()?;
    log.append_system("session_start")?;

    loop {
        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "동행",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw("")),
                Line::from(Span::styled(
                    ">_ donghang chat",
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    "type /help or ? for shortcuts",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let header = Block::default().borders(Borders::ALL).title("conversation");

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Shortcuts: Enter=send, q=quit, ?=help",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw("Commands: /help /status /queue /sync"));
                lines.push(Line::raw(""));
            }

            for m in &messages {
                let (tag, color) = match m.role {
                    Role::User => ("you", Color::Cyan),
                    Role::Assistant => ("금복", Color::Magenta),
                    Role::System => ("system", Color::Gray),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", tag), Style::default().fg(color)),
                    Span::raw(m.content.clone()),
                ]));
                lines.push(Line::raw(""));
            }

            let history = Paragraph::new(Text::from(lines))
                .block(header)
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let input_block = Block::default().borders(Borders::ALL).title("message");
            let input_widget = Paragraph::new(input.as_str())
                .block(input_block)
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('?') => {
                        show_help = !show_help;
                    }
                    KeyCode::Enter => {
                        let trimmed = input.trim().to_string();
                        if !trimmed.is_empty() {
                            log.append_user(&trimmed)?;

                            // Slash commands
                            if let Some(reply) = handle_slash(&trimmed, &cfg, &queue) {
                                messages.push(Msg {
                                    role: Role::Assistant,
                                    content: reply.clone(),
                                });
                                log.append_assistant(&reply)?;
                            } else {
                                messages.push(Msg {
                                    role: Role::User,
                                    content: trimmed.clone(),
                                });

                                let reply = handle_message(
                                    &cfg,
                                    &profile,
                                    &parser,
                                    &mut session,
                                    &queue,
                                    &trimmed,
                                );

                                messages.push(Msg {
                                    role: Role::Assistant,
                                    content: reply.clone(),
                                });
                                log.append_assistant(&reply)?;
                            }
                        }
                        input.clear();
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn handle_slash(input: &str, cfg: &Config, queue: &OfflineQueue) -> Option<String> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    match s {
        "/help" => Some(
            "Commands:\n\
- /help\n\
- /status (config + queue file locations)\n\
- /queue (pending offline records)\n\
- /sync (replay pending records to the server)\n\
\nShortcuts: Enter=send, q=quit, ?=toggle help"
                .to_string(),
        ),
        "/status" => Some(status_text(cfg, queue)),
        "/queue" => Some(queue_text(queue)),
        "/sync" => Some(sync_text(cfg, queue)),
        _ => Some("Unknown command. Try /help".to_string()),
    }
}

fn status_text(cfg: &Config, queue: &OfflineQueue) -> String {
    let pending = queue.unsynced().map(|q| q.len()).unwrap_or(0);
    let config_path = config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "?".to_string());
    format!(
        "Status:\n\
- server: {}\n\
- assistant: {} (enabled: {})\n\
- config: {}\n\
- pending offline records: {}",
        cfg.server.base_url, cfg.assistant.base_url, cfg.assistant.enabled, config_path, pending
    )
}

fn queue_text(queue: &OfflineQueue) -> String {
    match queue.unsynced() {
        Ok(entries) if entries.is_empty() => "대기 중인 기록이 없어요.".to_string(),
        Ok(entries) => {
            let mut s = format!("대기 중인 기록 {}건:\n", entries.len());
            for e in entries {
                s.push_str(&format!(
                    "- #{} {} {} {}원\n",
                    e.id,
                    e.record.transaction_date,
                    e.record.category.label(),
                    format_won(e.record.amount)
                ));
            }
            s.trim_end().to_string()
        }
        Err(e) => format!("큐를 읽을 수 없어요: {e}"),
    }
}

fn sync_text(cfg: &Config, queue: &OfflineQueue) -> String {
    let token = auth::load_auth().ok().and_then(|a| a.access_token);
    let client = ExpenseApiClient::new(&cfg.server.base_url, token);
    match ai::block_on(client.sync_queue(queue)) {
        Ok(Ok(report)) if report.failed == 0 => {
            format!("동기화 완료: {}건 올렸어요.", report.synced)
        }
        Ok(Ok(report)) => format!(
            "동기화 결과: 성공 {}건, 실패 {}건.\n{}",
            report.synced,
            report.failed,
            report.errors.join("\n")
        ),
        Ok(Err(e)) | Err(e) => format!("동기화에 실패했어요: {e}"),
    }
}

fn handle_message(
    cfg: &Config,
    profile: &Profile,
    parser: &ExpenseParser,
    session: &mut ChatSession,
    queue: &OfflineQueue,
    input: &str,
) -> String {
    let today = today_in(&profile.timezone).unwrap_or_else(|_| chrono::Utc::now().date_naive());

    // A pending record can always be abandoned.
    if session.pending_expense.is_some() && input.contains("취소") {
        session.take_pending();
        return "기록을 취소했어요. 다른 도움이 필요하시면 말씀해주세요!".to_string();
    }

    match route_message(session, parser, input, today) {
        Route::DateAnswer(date) => match session.take_pending() {
            Some(parsed) => record_expense(cfg, profile, queue, &parsed, date),
            None => fallback::fallback_reply(input),
        },
        Route::DateUnrecognized => {
            "언제 쓰신 건가요? 오늘, 어제, 또는 \"3월 5일\"처럼 말씀해주세요. (그만두시려면 \"취소\")"
                .to_string()
        }
        Route::ExpenseCandidate(parsed) => {
            let prompt = format!(
                "{} {}원 {} 지출로 적어둘게요. 언제 쓰신 건가요? (오늘/어제/날짜)",
                parsed.category.emoji(),
                format_won(parsed.amount),
                parsed.category.label(),
            );
            session.set_pending(parsed);
            prompt
        }
        Route::PortalRequest => {
            format!("복지로 사이트로 안내해드릴게요: {WELFARE_PORTAL_URL}")
        }
        Route::DetailRequest => {
            let text = detail_text(&session.last_recommended);
            session.clear_recommendation();
            text
        }
        Route::WelfareInquiry(inquiry) => {
            let services = fallback_services();
            let text = recommendation_text(&services, inquiry.specific_category);
            session.remember_recommendation(services);
            text
        }
        Route::SmallTalk => small_talk_reply(cfg, input),
    }
}

fn record_expense(
    cfg: &Config,
    profile: &Profile,
    queue: &OfflineQueue,
    parsed: &ParsedExpense,
    date: NaiveDate,
) -> String {
    let record = ExpenseRecord::from_parsed(parsed, date, chrono::Utc::now());

    // Screen against what this device has recorded so far.
    let amounts: Vec<u64> = queue
        .load()
        .map(|entries| entries.iter().map(|e| e.record.amount).collect())
        .unwrap_or_default();
    let hour = local_hour(&profile.timezone).unwrap_or(12);
    let risk = assess(record.amount, average_amount(&amounts), hour);

    let confirm = format!(
        "{} {}원을 {}(으)로 기록했어요! ({})",
        record.category.emoji(),
        format_won(record.amount),
        record.category.label(),
        record.transaction_date
    );

    let token = auth::load_auth().ok().and_then(|a| a.access_token);
    let client = ExpenseApiClient::new(&cfg.server.base_url, token);

    let mut reply = match ai::block_on(client.create(&record)) {
        Ok(Ok(_)) => confirm,
        _ => match queue.push(record) {
            Ok(id) => format!(
                "{confirm}\n지금은 서버에 연결할 수 없어 기기에 보관했어요 (#{id}). 연결되면 /sync 로 올릴게요."
            ),
            Err(_) => "기록에 실패했어요. 잠시 후 다시 말씀해주세요.".to_string(),
        },
    };

    if risk.is_anomalous {
        reply.push_str("\n⚠️ 평소보다 큰 금액이거나 늦은 시간이에요. 본인이 쓰신 게 맞는지 확인해주세요!");
    }
    reply
}

fn small_talk_reply(cfg: &Config, input: &str) -> String {
    if cfg.assistant.enabled {
        if let Ok(reply) = ai::chat_reply(cfg, &cfg.chat.session_id, input) {
            if !reply.trim().is_empty() {
                return reply;
            }
        }
    }
    fallback::fallback_reply(input)
}

fn recommendation_text(
    services: &[WelfareService],
    category: Option<WelfareCategory>,
) -> String {
    let mut s = match category {
        Some(c) => format!("{} 분야로 찾아봤어요!\n\n", c.label()),
        None => "오늘은 이런 활동 어떠세요?\n\n".to_string(),
    };
    for svc in services {
        s.push_str(&format!(
            "📋 {} ({})\n{}\n\n",
            svc.service_name, svc.organization_name, svc.service_summary
        ));
    }
    s.push_str("더 궁금하시면 \"자세히 알려줘\"라고 말씀해주세요!");
    s
}

fn detail_text(services: &[WelfareService]) -> String {
    if services.is_empty() {
        return "죄송합니다. 상세 정보를 가져올 수 없습니다.".to_string();
    }

    let mut s = "복지서비스 상세 정보를 알려드릴게요.\n\n".to_string();
    for svc in services {
        s.push_str(&format!("📋 {}\n", svc.service_name));
        s.push_str(&format!("📝 내용: {}\n", svc.service_summary));
        s.push_str(&format!("🏢 담당기관: {}\n\n", svc.organization_name));
    }
    s.push_str("📱 더 많은 복지서비스는 복지로에서 확인하세요!");
    s
}
