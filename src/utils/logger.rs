// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

#[cfg(feature = "gui")]
use gtk4::prelude::*;
#[cfg(feature = "gui")]
use gtk4::{glib, TextView};
#[cfg(feature = "gui")]
use std::sync::OnceLock;

#[cfg(feature = "gui")]
static LOG_VIEW: OnceLock<glib::SendWeakRef<TextView>> = OnceLock::new();
static LOGGER: ScreeningLogger = ScreeningLogger;

/// Writes every record to stderr, and to the window console once one is attached.
struct ScreeningLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn decorate(level: Level) -> (&'static str, &'static str) {
  match level {
    Level::Error => ("🔴", "error"),
    Level::Warn => ("🟠", "warn"),
    Level::Info => ("🔵", "info"),
    Level::Debug => ("⚪", "debug"),
    Level::Trace => ("▫️", "debug"),
  }
}

fn format_line(record: &Record) -> String {
  // Format: "🟠  T = 2400 K is outside ..."
  format!("{}  {}", decorate(record.level()).0, record.args())
}

/// Routes log output into the console pane as well. Colors are buffer tags.
#[cfg(feature = "gui")]
pub fn attach_view(view: &TextView) {
  let buffer = view.buffer();
  let tag_table = buffer.tag_table();

  for (name, color, bold) in [
    ("error", "#ff4444", true),
    ("warn", "#ffbb33", false),
    ("info", "#33b5e5", false),
    ("debug", "#aaaaaa", false),
  ] {
    if tag_table.lookup(name).is_none() {
      let tag = gtk4::TextTag::new(Some(name));
      tag.set_property("foreground", color);
      if bold {
        tag.set_property("weight", 700);
      }
      tag_table.add(&tag);
    }
  }

  let _ = LOG_VIEW.set(view.downgrade().into());
}

#[cfg(feature = "gui")]
fn append_to_view(msg: String, tag_name: &'static str) {
  if LOG_VIEW.get().is_none() {
    return;
  }

  glib::MainContext::default().spawn_local(async move {
    if let Some(view) = LOG_VIEW.get().and_then(|weak_ref| weak_ref.upgrade()) {
      let buffer = view.buffer();
      let mut end = buffer.end_iter();
      buffer.insert_with_tags_by_name(&mut end, &format!("{}\n", msg), &[tag_name]);

      // Auto-scroll
      let mark = buffer.create_mark(None, &buffer.end_iter(), false);
      view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
      buffer.delete_mark(&mark);
    }
  });
}

impl log::Log for ScreeningLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }
    let msg = format_line(record);
    eprintln!("{}", msg);

    #[cfg(feature = "gui")]
    append_to_view(msg, decorate(record.level()).1);
  }

  fn flush(&self) {}
}
