//! 対象ファイルの絞り込み

/// 拡張子（ドットなし、小文字）
pub const PDF_EXTENSION: &str = "pdf";

/// 名前を持つファイル候補
pub trait NamedFile {
    fn name(&self) -> &str;
}

impl NamedFile for String {
    fn name(&self) -> &str {
        self
    }
}

impl NamedFile for &str {
    fn name(&self) -> &str {
        self
    }
}

/// ファイル名が `.pdf` で終わるか（大文字小文字を区別しない）
pub fn is_pdf_name(name: &str) -> bool {
    let suffix_len = PDF_EXTENSION.len() + 1;
    if name.len() < suffix_len || !name.is_char_boundary(name.len() - suffix_len) {
        return false;
    }
    let suffix = &name[name.len() - suffix_len..];
    suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(PDF_EXTENSION)
}

/// PDFだけを入力順のまま残す
///
/// 結果が空の場合、呼び出し側は処理を中断すること
pub fn filter_pdfs<T: NamedFile>(candidates: Vec<T>) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|c| is_pdf_name(c.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_name() {
        assert!(is_pdf_name("acta.pdf"));
        assert!(is_pdf_name("ACTA.PDF"));
        assert!(is_pdf_name("acta.Pdf"));
        assert!(is_pdf_name(".pdf"));
        assert!(is_pdf_name("año 2023.pdf"));
        assert!(!is_pdf_name("acta.pdf.txt"));
        assert!(!is_pdf_name("actapdf"));
        assert!(!is_pdf_name("pdf"));
        assert!(!is_pdf_name(""));
        assert!(!is_pdf_name("imagen.png"));
    }

    #[test]
    fn test_is_pdf_name_multibyte_boundary() {
        // 末尾4バイトが文字境界をまたぐケースでパニックしない
        assert!(!is_pdf_name("あい"));
        assert!(!is_pdf_name("ñ"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = vec!["b.pdf", "notes.txt", "A.PDF", "c.docx", "z.pdf"];
        let output = filter_pdfs(input.clone());
        assert_eq!(output, vec!["b.pdf", "A.PDF", "z.pdf"]);
        assert!(output.len() <= input.len());
    }

    #[test]
    fn test_filter_empty_and_no_match() {
        assert!(filter_pdfs(Vec::<String>::new()).is_empty());
        let input = vec![
            "foto.jpg".to_string(),
            "datos.xlsx".to_string(),
            "leeme".to_string(),
        ];
        assert!(filter_pdfs(input).is_empty());
    }
}
