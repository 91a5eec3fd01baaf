//! Filesystem operations.
//!
//! Each operation returns [`Result`](crate::errors::Result) and has an `_ec`
//! twin that reports failure through an `Option<FsError>` slot instead.

mod copy;
mod copy_file;
mod create;
mod io_copy;
mod modify;
mod query;
mod remove;
mod resolve;
mod space;
mod status;
mod temp;
mod types;

pub use copy::{copy, copy_ec, copy_symlink, copy_symlink_ec};
pub use copy_file::{copy_file, copy_file_ec};
pub use create::{
    create_directories, create_directories_ec, create_directory, create_directory_ec,
    create_directory_symlink, create_directory_symlink_ec, create_directory_with_attributes,
    create_directory_with_attributes_ec, create_hard_link, create_hard_link_ec, create_symlink,
    create_symlink_ec,
};
pub use modify::{
    permissions, permissions_ec, rename, rename_ec, resize_file, resize_file_ec,
    set_last_write_time, set_last_write_time_ec,
};
pub use query::{
    equivalent, equivalent_ec, exists, exists_ec, file_size, file_size_ec, hard_link_count,
    hard_link_count_ec, is_block_file, is_character_file, is_directory, is_directory_ec, is_empty,
    is_empty_ec, is_fifo, is_other, is_other_ec, is_regular_file, is_regular_file_ec, is_socket,
    is_symlink, is_symlink_ec, last_write_time, last_write_time_ec, read_symlink, read_symlink_ec,
};
pub use remove::{remove, remove_all, remove_all_ec, remove_ec};
pub use resolve::{
    absolute, absolute_ec, canonical, canonical_ec, current_path, current_path_ec,
    set_current_path, set_current_path_ec, system_complete,
};
pub use space::{space, space_ec};
pub use status::{status, status_ec, symlink_status, symlink_status_ec};
pub use temp::{temp_directory_path, temp_directory_path_ec};
pub use types::{CopyOptions, FileStatus, FileType, Perms, SpaceInfo};

/// True when `st` holds a determined status (anything but `FileType::None`).
pub fn status_known(st: &FileStatus) -> bool {
    st.status_known()
}
