// Sheetmarks state managers
// Managers own client-side state: the bookmark list, the editor modal, paging, notifications.

pub mod bookmark_editor;
pub mod bookmark_list;
pub mod notification_center;
pub mod pagination;
