//! System tray icon that mirrors the recording screen.
//!
//! The icon shows the record glyph over the loudness color, the tooltip and a
//! disabled menu line show the recording status, and the menu offers Toggle
//! recording and Exit.

use crate::{AppError, AppResult, TrayView, tray_icon_render::render_icon};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    status_item: MenuItem,
    toggle_item_id: MenuId,
    exit_item_id: MenuId,
    current: TrayView,
}

impl TrayManager {
    /// Create a new tray manager showing the idle view.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let view = TrayView::default();
        let menu = Menu::new();

        let status_item = MenuItem::new(view.status_text(), false, None);
        let toggle_item = MenuItem::new("Toggle recording", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let toggle_id = toggle_item.id().clone();
        let exit_id = exit_item.id().clone();

        menu.append_items(&[
            &status_item,
            &PredefinedMenuItem::separator(),
            &toggle_item,
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(view.status_text())
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(&view)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            status_item,
            toggle_item_id: toggle_id,
            exit_item_id: exit_id,
            current: view,
        })
    }

    /// Redraw icon, tooltip and status line. Unchanged views are skipped.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_view(&mut self, view: TrayView) -> AppResult<()> {
        if view == self.current {
            return Ok(());
        }

        if view.glyph != self.current.glyph || view.color != self.current.color {
            self.tray_icon
                .set_icon(Some(Self::load_icon(&view)?))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update icon: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        if view.status != self.current.status {
            let text = view.status_text();
            self.tray_icon
                .set_tooltip(Some(&text))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update tooltip: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            self.status_item.set_text(text);
        }

        debug!(glyph = ?view.glyph, color = %view.color, status = %view.status, "Tray view updated");
        self.current = view;

        Ok(())
    }

    #[track_caller]
    fn load_icon(view: &TrayView) -> AppResult<Icon> {
        let rgba = render_icon(view);
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the toggle menu item ID.
    pub fn toggle_item_id(&self) -> &MenuId {
        &self.toggle_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
