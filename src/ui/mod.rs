// src/ui/mod.rs

use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{glib, Application, ApplicationWindow, DrawingArea, Frame, Orientation, ScrolledWindow, TextView};
use gtk4::{Revealer, RevealerTransitionType};
use plotters::prelude::*;
use plotters_cairo::CairoBackend;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use ellingham::rendering::draw_chart;
use ellingham::state::AppState;
use ellingham::utils::logger;

pub mod menu;
pub mod sidebar;

/// Widgets that have to follow every state change
#[derive(Clone)]
pub struct Views {
    pub drawing_area: DrawingArea,
    pub ranking_view: TextView,
    pub species_box: GtkBox,
}

impl Views {
    /// Re-pulls the ranking text and redraws the chart
    pub fn refresh(&self, state: &AppState) {
        self.ranking_view.buffer().set_text(&state.ranking_report());
        self.drawing_area.queue_draw();
    }
}

pub fn run(state: AppState) -> ExitCode {
    let app = Application::builder()
        .application_id("org.mavensgroup.ellingham")
        .build();

    let state = Rc::new(RefCell::new(state));
    app.connect_activate(move |app| build_ui(app, state.clone()));

    // clap already consumed argv
    let no_args: [&str; 0] = [];
    let code = app.run_with_args(&no_args);
    if code == glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_ui(app: &Application, state: Rc<RefCell<AppState>>) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Ellingham Diagram: Cu affinity screening")
        .default_width(1300)
        .default_height(850)
        .build();

    // 1. TOP LEVEL: Vertical Box (Menu on top, Main Content below)
    let root_vbox = GtkBox::new(Orientation::Vertical, 0);
    window.set_child(Some(&root_vbox));

    // 2. MAIN CONTENT: Horizontal Box (Sidebar | Right_Panel)
    let main_hbox = GtkBox::new(Orientation::Horizontal, 0);

    // --- Right Panel (Chart + Console) ---
    let right_vbox = GtkBox::new(Orientation::Vertical, 0);
    right_vbox.set_hexpand(true);

    let drawing_area = DrawingArea::new();
    drawing_area.set_vexpand(true);

    let info_frame = Frame::new(None);
    let console_view = TextView::builder()
        .editable(false).cursor_visible(false).monospace(true)
        .left_margin(10).right_margin(10).top_margin(10).bottom_margin(10)
        .build();
    let scroll_win = ScrolledWindow::builder()
        .min_content_height(120)
        .child(&console_view)
        .build();
    info_frame.set_child(Some(&scroll_win));
    logger::attach_view(&console_view);

    right_vbox.append(&drawing_area);
    right_vbox.append(&info_frame);

    // --- Left Panel (Sidebar) ---
    let ranking_view = TextView::builder()
        .editable(false).cursor_visible(false).monospace(true)
        .left_margin(6).right_margin(6).top_margin(6).bottom_margin(6)
        .build();
    let species_box = GtkBox::new(Orientation::Vertical, 2);

    let views = Views {
        drawing_area: drawing_area.clone(),
        ranking_view: ranking_view.clone(),
        species_box: species_box.clone(),
    };
    let sidebar_widget = sidebar::build(state.clone(), &views);

    let sidebar_revealer = Revealer::builder()
        .transition_type(RevealerTransitionType::SlideRight)
        .child(&sidebar_widget)
        .reveal_child(true)
        .build();

    main_hbox.append(&sidebar_revealer);
    main_hbox.append(&right_vbox);

    // 3. Menu Bar
    let menu_bar = menu::build_menu_and_actions(app, &window, state.clone(), &views);

    // 4. ACTION: Toggle Sidebar (F9)
    let toggle_action = gtk4::gio::SimpleAction::new("toggle_sidebar", None);
    let rev_weak = sidebar_revealer.downgrade();
    toggle_action.connect_activate(move |_, _| {
        if let Some(rev) = rev_weak.upgrade() {
            rev.set_reveal_child(!rev.reveals_child());
        }
    });
    app.add_action(&toggle_action);
    app.set_accels_for_action("app.toggle_sidebar", &["F9"]);

    root_vbox.append(&menu_bar);
    root_vbox.append(&main_hbox);

    // Drawing Function: pull a fresh PlotData on every frame
    let s = state.clone();
    drawing_area.set_draw_func(move |_, cr, w, h| {
        let st = s.borrow();

        let backend = match CairoBackend::new(cr, (w as u32, h as u32)) {
            Ok(b) => b,
            Err(e) => {
                log::error!("Cairo backend: {}", e);
                return;
            }
        };
        let root = backend.into_drawing_area();
        if let Err(e) = root.fill(&WHITE) {
            log::error!("Draw failed: {}", e);
            return;
        }

        let drawn = st
            .plot_data()
            .map_err(|e| e.to_string())
            .and_then(|plot| draw_chart(&root, &plot).map_err(|e| e.to_string()));
        if let Err(e) = drawn {
            log::error!("Draw failed: {}", e);
        }
    });

    views.refresh(&state.borrow());
    {
        let st = state.borrow();
        log::info!("Dataset: {} ({} curves)", st.dataset.source, st.dataset.len());
        if let Some(w) = st.config.window.check(st.temperature_k) {
            log::warn!("{}", w);
        }
    }

    window.present();
}
