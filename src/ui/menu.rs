// src/ui/menu.rs

use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, FileChooserAction, FileChooserNative, FileFilter, ResponseType};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use super::{sidebar, Views};
use ellingham::config::ExportFormat;
use ellingham::io::tc_table;
use ellingham::rendering;
use ellingham::state::AppState;

pub fn build_menu_and_actions(
  app: &Application,
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  views: &Views,
) -> gtk4::Box {
  setup_open(app, window, state.clone(), views);
  setup_export(app, window, state.clone());
  setup_save_table(app, window, state.clone());

  // --- SAVE SETTINGS ---
  let settings_action = gtk4::gio::SimpleAction::new("save_settings", None);
  let st_weak = Rc::downgrade(&state);
  settings_action.connect_activate(move |_, _| {
    if let Some(st) = st_weak.upgrade() {
      let mut s = st.borrow_mut();
      let (t, selection) = (s.temperature_k, s.selection.clone());
      s.config.default_temperature_k = t;
      s.config.default_selection = selection;
      log::info!("{}", s.config.save());
    }
  });
  app.add_action(&settings_action);

  // --- QUIT ---
  let quit_action = gtk4::gio::SimpleAction::new("quit", None);
  let win_weak = window.downgrade();
  quit_action.connect_activate(move |_, _| {
    if let Some(win) = win_weak.upgrade() {
      win.close();
    }
  });
  app.add_action(&quit_action);

  // Keyboard Shortcuts
  app.set_accels_for_action("app.open", &["<Primary>o"]);
  app.set_accels_for_action("app.export", &["<Primary>e"]);
  app.set_accels_for_action("app.save_table", &["<Primary><Shift>s"]);
  app.set_accels_for_action("app.quit", &["<Primary>q"]);

  // --- BUILD MENU BAR ---
  let menu_bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
  let root_model = gtk4::gio::Menu::new();

  let file_menu = gtk4::gio::Menu::new();
  file_menu.append(Some("Open ΔG Table..."), Some("app.open"));
  file_menu.append(Some("Export Diagram..."), Some("app.export"));
  file_menu.append(Some("Save Sweep as CSV..."), Some("app.save_table"));
  file_menu.append(Some("Save Settings"), Some("app.save_settings"));
  file_menu.append(Some("Quit"), Some("app.quit"));
  root_model.append_submenu(Some("File"), &file_menu);

  let view_menu = gtk4::gio::Menu::new();
  view_menu.append(Some("Toggle Sidebar"), Some("app.toggle_sidebar"));
  root_model.append_submenu(Some("View"), &view_menu);

  let popover_bar = gtk4::PopoverMenuBar::from_model(Some(&root_model));
  menu_bar.append(&popover_bar);

  menu_bar
}

/// Runs a native file dialog and hands the chosen path to `on_path`.
fn choose_file(
  window: &ApplicationWindow,
  title: &str,
  action: FileChooserAction,
  filter: Option<(&str, &[&str])>,
  current_name: Option<&str>,
  on_path: impl Fn(PathBuf) + 'static,
) {
  let accept = if action == FileChooserAction::Save { "Save" } else { "Open" };
  let dialog = FileChooserNative::new(Some(title), Some(window), action, Some(accept), Some("Cancel"));

  if let Some((name, patterns)) = filter {
    let f = FileFilter::new();
    f.set_name(Some(name));
    for p in patterns {
      f.add_pattern(p);
    }
    dialog.add_filter(&f);
  }
  if let Some(n) = current_name {
    dialog.set_current_name(n);
  }

  dialog.connect_response(move |d, response| {
    if response == ResponseType::Accept {
      if let Some(path) = d.file().and_then(|f| f.path()) {
        on_path(path);
      }
    }
    d.destroy();
  });
  dialog.show();
}

fn setup_open(app: &Application, window: &ApplicationWindow, state: Rc<RefCell<AppState>>, views: &Views) {
  let open_action = gtk4::gio::SimpleAction::new("open", None);
  let win_weak = window.downgrade();
  let views = views.clone();

  open_action.connect_activate(move |_, _| {
    let win = match win_weak.upgrade() {
      Some(w) => w,
      None => return,
    };
    let state = state.clone();
    let views = views.clone();

    choose_file(
      &win,
      "Open ΔG Table",
      FileChooserAction::Open,
      Some(("CSV Table (*.csv)", &["*.csv"][..])),
      None,
      move |path| {
        let unit = state.borrow().config.energy_unit;
        match tc_table::load(&path, unit) {
          Ok(dataset) => {
            state.borrow_mut().replace_dataset(dataset);
            sidebar::refresh_species_list(state.clone(), &views);
            views.refresh(&state.borrow());
          }
          Err(e) => log::error!("{}", e),
        }
      },
    );
  });
  app.add_action(&open_action);
}

fn setup_export(app: &Application, window: &ApplicationWindow, state: Rc<RefCell<AppState>>) {
  let export_action = gtk4::gio::SimpleAction::new("export", None);
  let win_weak = window.downgrade();

  export_action.connect_activate(move |_, _| {
    let win = match win_weak.upgrade() {
      Some(w) => w,
      None => return,
    };
    let default_format = state.borrow().config.default_export_format;
    let name = format!("ellingham.{}", default_format.extension());
    let state = state.clone();

    choose_file(
      &win,
      "Export Diagram",
      FileChooserAction::Save,
      Some(("Images (*.svg, *.png, *.pdf)", &["*.svg", "*.png", "*.pdf"][..])),
      Some(&name),
      move |path| {
        let st = state.borrow();
        let format = ExportFormat::from_path(&path).unwrap_or(default_format);
        let result = st
          .plot_data()
          .and_then(|plot| rendering::export(&plot, &path, format, &st.config.style));
        if let Err(e) = result {
          log::error!("{}", e);
        }
      },
    );
  });
  app.add_action(&export_action);
}

fn setup_save_table(app: &Application, window: &ApplicationWindow, state: Rc<RefCell<AppState>>) {
  let save_action = gtk4::gio::SimpleAction::new("save_table", None);
  let win_weak = window.downgrade();

  save_action.connect_activate(move |_, _| {
    let win = match win_weak.upgrade() {
      Some(w) => w,
      None => return,
    };
    let state = state.clone();

    choose_file(
      &win,
      "Save Sweep as CSV",
      FileChooserAction::Save,
      Some(("CSV Table (*.csv)", &["*.csv"][..])),
      Some("ellingham_sweep.csv"),
      move |path| {
        let st = state.borrow();
        let result = st
          .config
          .sweep
          .range()
          .and_then(|range| tc_table::save(&path, &st.selected_curves(), &range));
        if let Err(e) = result {
          log::error!("{}", e);
        }
      },
    );
  });
  app.add_action(&save_action);
}
