//! 入力パスの走査
//!
//! CLIに渡されたファイル・フォルダからファイル候補を集める。
//! 拡張子による絞り込みは行わない（`acta_common::filter_pdfs` の責務）。

use crate::error::{Result, UploaderError};
use acta_common::NamedFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 選択された1ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
}

impl FileHandle {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name,
            path: path.to_path_buf(),
        }
    }

    /// 送信時に内容を読み込む
    pub async fn read_content(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

impl NamedFile for FileHandle {
    fn name(&self) -> &str {
        &self.name
    }
}

/// パス群からファイル候補を集める
///
/// - ファイル: そのまま追加
/// - フォルダ: 直下のファイル（`recursive` ならサブフォルダも）をファイル名順で追加
pub fn collect_candidates(paths: &[PathBuf], recursive: bool) -> Result<Vec<FileHandle>> {
    let mut candidates = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(UploaderError::PathNotFound(path.display().to_string()));
        }

        if path.is_file() {
            candidates.push(FileHandle::from_path(path));
            continue;
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() {
                candidates.push(FileHandle::from_path(entry.path()));
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_collect_path_not_found() {
        let result = collect_candidates(&[PathBuf::from("/nonexistent/folder")], false);
        assert!(matches!(result, Err(UploaderError::PathNotFound(_))));
    }

    #[test]
    fn test_collect_folder_sorted_by_name() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.pdf")).unwrap();
        File::create(dir.path().join("a.pdf")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();

        let result = collect_candidates(&[dir.path().to_path_buf()], false).unwrap();
        let names: Vec<&str> = result.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c.pdf"]);
    }

    #[test]
    fn test_collect_recursive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("2023");
        fs::create_dir_all(&sub).unwrap();
        File::create(dir.path().join("raiz.pdf")).unwrap();
        File::create(sub.join("interno.pdf")).unwrap();

        let flat = collect_candidates(&[dir.path().to_path_buf()], false).unwrap();
        assert_eq!(flat.len(), 1);

        let deep = collect_candidates(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 2);
        assert!(deep.iter().any(|f| f.name == "interno.pdf"));
    }

    #[test]
    fn test_collect_mixed_files_and_folders_keeps_argument_order() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("lote");
        fs::create_dir_all(&folder).unwrap();
        File::create(folder.join("x.pdf")).unwrap();
        let single = dir.path().join("suelto.PDF");
        File::create(&single).unwrap();

        let result = collect_candidates(&[single.clone(), folder], false).unwrap();
        assert_eq!(result[0].name, "suelto.PDF");
        assert_eq!(result[0].path, single);
        assert_eq!(result[1].name, "x.pdf");
    }

    #[tokio::test]
    async fn test_read_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("acta.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let handle = FileHandle::from_path(&path);
        assert_eq!(handle.read_content().await.unwrap(), b"%PDF-1.4");
    }
}
