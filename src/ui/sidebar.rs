// src/ui/sidebar.rs

use gtk4::prelude::*;
use gtk4::{
  Adjustment, Align, Box as GtkBox, CheckButton, Expander, Label, Orientation, PolicyType, Scale,
  ScrolledWindow, Separator,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::Views;
use ellingham::model::library;
use ellingham::physics::{celsius_to_kelvin, kelvin_to_celsius};
use ellingham::state::AppState;

/// Slider snapping step, °C
const SLIDER_STEP_C: f64 = 5.0;

pub fn build(state: Rc<RefCell<AppState>>, views: &Views) -> ScrolledWindow {
  // 1. Root Container (Scrollable)
  let scroll = ScrolledWindow::builder()
    .hscrollbar_policy(PolicyType::Never)
    .vscrollbar_policy(PolicyType::Automatic)
    .min_content_width(320)
    .build();

  let root_vbox = GtkBox::new(Orientation::Vertical, 10);
  root_vbox.set_margin_start(10);
  root_vbox.set_margin_end(10);
  root_vbox.set_margin_top(10);
  root_vbox.set_margin_bottom(10);
  scroll.set_child(Some(&root_vbox));

  // ============================================================
  // SECTION 1: TEMPERATURE
  // ============================================================
  let (min_c, max_c, current_c) = {
    let st = state.borrow();
    let grid = st.config.sweep;
    (
      kelvin_to_celsius(grid.start_k).ceil(),
      kelvin_to_celsius(grid.stop_k).floor(),
      kelvin_to_celsius(st.temperature_k),
    )
  };

  let temp_box = GtkBox::new(Orientation::Vertical, 2);
  temp_box.append(&Label::builder().label("Temperature (°C)").halign(Align::Start).build());

  let kelvin_label = Label::builder()
    .label(format!("{:.0} K", celsius_to_kelvin(current_c)))
    .halign(Align::Start)
    .build();
  kelvin_label.add_css_class("dim-label");

  let adj = Adjustment::new(current_c, min_c, max_c, SLIDER_STEP_C, SLIDER_STEP_C * 10.0, 0.0);
  let scale = Scale::new(Orientation::Horizontal, Some(&adj));
  scale.set_digits(0);
  scale.set_draw_value(true);
  scale.set_value_pos(gtk4::PositionType::Right);

  let st_weak = Rc::downgrade(&state);
  let views_t = views.clone();
  let kelvin_weak = kelvin_label.downgrade();
  scale.connect_value_changed(move |sc| {
    let raw = sc.value();
    let snapped = (raw / SLIDER_STEP_C).round() * SLIDER_STEP_C;

    if (raw - snapped).abs() > 0.0001 {
      sc.set_value(snapped);
      return;
    }

    if let Some(st) = st_weak.upgrade() {
      let t_k = celsius_to_kelvin(snapped);
      st.borrow_mut().set_temperature(t_k);
      if let Some(lbl) = kelvin_weak.upgrade() {
        lbl.set_label(&format!("{:.0} K", t_k));
      }
      views_t.refresh(&st.borrow());
    }
  });

  temp_box.append(&scale);
  temp_box.append(&kelvin_label);
  root_vbox.append(&temp_box);
  root_vbox.append(&Separator::new(Orientation::Horizontal));

  // ============================================================
  // SECTION 2: SPECIES
  // ============================================================
  let species_expander = Expander::new(Some("Species"));
  species_expander.set_expanded(true);
  views.species_box.set_margin_top(5);
  views.species_box.set_margin_start(5);
  species_expander.set_child(Some(&views.species_box));
  refresh_species_list(state.clone(), views);
  root_vbox.append(&species_expander);
  root_vbox.append(&Separator::new(Orientation::Horizontal));

  // ============================================================
  // SECTION 3: RANKING
  // ============================================================
  let ranking_expander = Expander::new(Some("Stability Ranking"));
  ranking_expander.set_expanded(true);
  ranking_expander.set_child(Some(&views.ranking_view));
  root_vbox.append(&ranking_expander);

  scroll
}

/// Rebuilds the species check boxes, e.g. after a new table is opened.
pub fn refresh_species_list(state: Rc<RefCell<AppState>>, views: &Views) {
  while let Some(child) = views.species_box.first_child() {
    views.species_box.remove(&child);
  }

  let entries: Vec<(String, bool)> = {
    let st = state.borrow();
    st.dataset
      .names()
      .into_iter()
      .map(|n| (n.to_string(), st.is_selected(n)))
      .collect()
  };

  for (name, active) in entries {
    let check = CheckButton::with_label(&library::pretty_formula(&name));
    check.set_active(active);

    let st_weak = Rc::downgrade(&state);
    let views_c = views.clone();
    check.connect_toggled(move |btn| {
      if let Some(st) = st_weak.upgrade() {
        st.borrow_mut().set_selected(&name, btn.is_active());
        views_c.refresh(&st.borrow());
      }
    });
    views.species_box.append(&check);
  }
}
