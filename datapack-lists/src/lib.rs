//! List implementations for datapack.
//!
//! - [`VecDataList`]: the array-backed list: storage is a plain `Vec` of
//!   shared packet handles
//! - [`PagedDataList`]: a [`VecDataList`] holding one page of a larger
//!   result, plus the total count of that result
//!
//! Both implement [`ListStorage`](datapack_model::ListStorage) and so pick
//! up every [`DataList`](datapack_model::DataList) operation. Neither locks
//! internally; both report `is_synchronized() == false`.

mod paged;
mod vec_list;

pub use paged::PagedDataList;
pub use vec_list::VecDataList;
