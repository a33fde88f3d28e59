//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod folder_list;
mod folder_section;
mod item_row;
mod kind_selector;
mod new_folder_form;
mod new_item_form;
mod notice_banner;
mod status_bar;
mod toolbar;

pub use delete_confirm_button::DeleteConfirmButton;
pub use folder_list::FolderList;
pub use folder_section::FolderSection;
pub use item_row::ItemRow;
pub use kind_selector::KindSelector;
pub use new_folder_form::NewFolderForm;
pub use new_item_form::NewItemForm;
pub use notice_banner::NoticeBanner;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;
