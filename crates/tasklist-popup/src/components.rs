mod editor_panel;
mod filter_bar;
mod task_list;
mod task_list_row;

pub use editor_panel::EditorPanel;
pub use filter_bar::FilterBar;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
