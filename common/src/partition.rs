//! ロット分割

use crate::error::{Error, Result};

/// 1リクエストあたりのデフォルトファイル数
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// 入力順を保ったまま `chunk_size` 件ずつのロットに分割する
///
/// 最後のロットだけが `chunk_size` 未満になりうる。空入力は空のVec。
pub fn partition<T>(items: Vec<T>, chunk_size: usize) -> Result<Vec<Vec<T>>> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize(chunk_size));
    }

    let mut batches = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(chunk_size).collect());
    }
    Ok(batches)
}
