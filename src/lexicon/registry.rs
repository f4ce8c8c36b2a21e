/// Static metadata for a well-known GTAB table, enumerated for UI display
/// before the table itself is ever loaded from disk.
#[derive(Debug, Clone, Copy)]
pub struct GtabTableInfo {
    pub id: u32,
    pub filename: &'static str,
    pub name: &'static str,
    pub icon_hint: &'static str,
}

pub const BUILTIN_GTAB_TABLES: &[GtabTableInfo] = &[
    GtabTableInfo { id: 1, filename: "cj.gtab", name: "倉頡", icon_hint: "cj" },
    GtabTableInfo { id: 2, filename: "cj5.gtab", name: "倉頡五代", icon_hint: "cj" },
    GtabTableInfo { id: 3, filename: "scj6.gtab", name: "速成", icon_hint: "cj" },
    GtabTableInfo { id: 4, filename: "boshiamy.gtab", name: "嘸蜜", icon_hint: "boshiamy" },
    GtabTableInfo { id: 5, filename: "array30.gtab", name: "行列30", icon_hint: "array" },
    GtabTableInfo { id: 6, filename: "array40.gtab", name: "行列40", icon_hint: "array" },
    GtabTableInfo { id: 7, filename: "dayi3.gtab", name: "大易", icon_hint: "dayi" },
    GtabTableInfo { id: 8, filename: "gin_yieh.gtab", name: "金楷", icon_hint: "ginyieh" },
    GtabTableInfo { id: 9, filename: "ezbig.gtab", name: "輕鬆", icon_hint: "ezbig" },
    GtabTableInfo { id: 10, filename: "zhbihua.gtab", name: "筆劃", icon_hint: "bihua" },
    GtabTableInfo { id: 11, filename: "zhpy.gtab", name: "漢語拼音", icon_hint: "pinyin" },
    GtabTableInfo { id: 12, filename: "zrxp.gtab", name: "自然碼", icon_hint: "ziranma" },
    GtabTableInfo { id: 13, filename: "wubi86.gtab", name: "五筆86", icon_hint: "wubi" },
    GtabTableInfo { id: 14, filename: "zhengma.gtab", name: "鄭碼", icon_hint: "zhengma" },
    GtabTableInfo { id: 15, filename: "telecode.gtab", name: "電報", icon_hint: "telecode" },
    GtabTableInfo { id: 16, filename: "unicode.gtab", name: "萬國碼", icon_hint: "unicode" },
    GtabTableInfo { id: 17, filename: "dachen_cj.gtab", name: "大千倉頡", icon_hint: "cj" },
    GtabTableInfo { id: 18, filename: "jyutping.gtab", name: "粵拼", icon_hint: "jyutping" },
    GtabTableInfo { id: 19, filename: "seccode.gtab", name: "二式注音", icon_hint: "pinyin" },
    GtabTableInfo { id: 20, filename: "hanyupin.gtab", name: "漢語拼音二式", icon_hint: "pinyin" },
    GtabTableInfo { id: 21, filename: "stroke5.gtab", name: "五碼筆劃", icon_hint: "bihua" },
];

pub fn find_by_id(id: u32) -> Option<&'static GtabTableInfo> {
    BUILTIN_GTAB_TABLES.iter().find(|t| t.id == id)
}

pub fn find_by_filename(filename: &str) -> Option<&'static GtabTableInfo> {
    BUILTIN_GTAB_TABLES.iter().find(|t| t.filename == filename)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = BUILTIN_GTAB_TABLES.iter().map(|t| t.id).collect();
        let original_len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), original_len);
    }

    #[test]
    fn find_by_id_and_filename_agree() {
        let entry = find_by_id(4).unwrap();
        assert_eq!(entry.filename, "boshiamy.gtab");
        assert_eq!(find_by_filename("boshiamy.gtab").unwrap().id, 4);
    }
}
