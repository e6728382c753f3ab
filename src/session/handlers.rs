//! Session message handlers
//!
//! Handles Msg for all editing operations. Each handler returns whether the
//! event was consumed, i.e. whether the host should suppress its default
//! behavior (text selection while dragging, the browser-style context menu).

use crate::domain::{IconChoice, MapStyle, OutputSize, Point};
use crate::session::messages::{LayerMsg, Msg, PointerMsg, ViewMsg};
use crate::session::state::PosterSession;

/// Handle a Msg, modifying session state
pub fn handle_msg(session: &mut PosterSession, msg: Msg) -> bool {
    match msg {
        Msg::Layer(msg) => handle_layer(session, msg),
        Msg::Pointer(msg) => handle_pointer(session, msg),
        Msg::Edit(field) => session.edit(field),
        Msg::View(msg) => handle_view(session, msg),
    }
}

fn handle_layer(session: &mut PosterSession, msg: LayerMsg) -> bool {
    match msg {
        LayerMsg::AddText(text) => {
            session.add_text(text);
            true
        }
        LayerMsg::AddIcon(icon) => {
            let path = match IconChoice::find(&icon) {
                Some(choice) => choice.path.to_string(),
                None => icon,
            };
            session.add_icon(path);
            true
        }
        LayerMsg::Remove(id) => {
            session.remove(&id);
            true
        }
        LayerMsg::RemoveLast => session.remove_last().is_some(),
        LayerMsg::Edit(id) => session.open_editor(&id),
        LayerMsg::CloseEditor => session.close_editor().is_some(),
    }
}

fn handle_pointer(session: &mut PosterSession, msg: PointerMsg) -> bool {
    match msg {
        PointerMsg::Down(x, y) => session.pointer_down(Point::new(x, y)),
        PointerMsg::Move(x, y) => session.pointer_move(Point::new(x, y)),
        PointerMsg::Up => session.pointer_up().is_some(),
        PointerMsg::ContextMenu(x, y) => session.context_menu(Point::new(x, y)),
    }
}

fn handle_view(session: &mut PosterSession, msg: ViewMsg) -> bool {
    match msg {
        ViewMsg::Resize { origin, size } => {
            session.resize_container(origin, size);
            true
        }
        ViewMsg::OutputSize(name) => match OutputSize::find(&name) {
            Some(size) => {
                session.set_output_size(*size);
                true
            }
            None => {
                log::warn!("Ignoring unknown output size {name:?}");
                false
            }
        },
        ViewMsg::MapStyle(name) => match MapStyle::find(&name) {
            Some(style) => {
                session.set_map_style(*style);
                true
            }
            None => {
                log::warn!("Ignoring unknown map style {name:?}");
                false
            }
        },
    }
}
