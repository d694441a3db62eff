use crate::core::{MappedParameter, MappedPattern, Pattern};

/// 將 API 取回的規則轉成設定 API 需要的格式
///
/// 停用的規則會被略過；參數值取自規則宣告的預設值，沒有預設值時為空字串。
/// 沒有參數的規則輸出時不帶 `parameters` 欄位。
pub fn map_patterns(patterns: &[Pattern]) -> Vec<MappedPattern> {
    patterns
        .iter()
        .filter(|pattern| pattern.enabled)
        .map(map_pattern)
        .collect()
}

fn map_pattern(pattern: &Pattern) -> MappedPattern {
    let parameters = pattern
        .parameters
        .as_ref()
        .map(|params| {
            params
                .iter()
                .map(|param| MappedParameter {
                    name: param.name.clone(),
                    value: param.default.clone().unwrap_or_default(),
                })
                .collect::<Vec<_>>()
        })
        .filter(|mapped| !mapped.is_empty());

    MappedPattern {
        id: pattern.id.clone(),
        enabled: pattern.enabled,
        parameters,
    }
}
