//! Prompt assembly for every feature.
//!
//! All instruction text sent to the API is built here: per-feature framing
//! prefixes, the technical-drawing specification sentence, style and detail
//! modifiers for text-to-image runs, the composite smart-edit template, and
//! the system instructions plus response schemas for the structured-output
//! features. Everything is pure and deterministic; identical inputs always
//! assemble byte-identical prompts.

use serde_json::{json, Value};

use crate::dispatch::RenderSettings;
use crate::features::FeatureKey;

/// Active UI language. Prompt framing, system instructions, and report
/// headers are localized; the user's own instruction text is passed through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Vi,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    /// Parse a language code, defaulting to Vietnamese (the app's home
    /// locale) for anything unrecognized.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::En,
            _ => Language::Vi,
        }
    }
}

/// Localized display title for a feature, captured into history entries at
/// creation time.
pub fn feature_title(key: FeatureKey, language: Language) -> &'static str {
    match (key, language) {
        (FeatureKey::SurrealExterior, Language::En) => "Surreal Exterior Render",
        (FeatureKey::SurrealExterior, Language::Vi) => "Render Ngoại thất Siêu thực",
        (FeatureKey::InstantInterior, Language::En) => "Instant Interior Design",
        (FeatureKey::InstantInterior, Language::Vi) => "Thiết kế Nội thất Tức thì",
        (FeatureKey::MasterPlan, Language::En) => "Master Plan Project",
        (FeatureKey::MasterPlan, Language::Vi) => "Quy hoạch Dự án Tổng thể",
        (FeatureKey::SmartEdit, Language::En) => "Smart Edit / Add Detail",
        (FeatureKey::SmartEdit, Language::Vi) => "Chỉnh sửa Thông minh / Thêm chi tiết",
        (FeatureKey::SketchupFinalize, Language::En) => "Finalize SketchUp Drawing",
        (FeatureKey::SketchupFinalize, Language::Vi) => "Hoàn thiện Nét vẽ SketchUp",
        (FeatureKey::PlanTo3d, Language::En) => "Convert 2D Plan to 3D",
        (FeatureKey::PlanTo3d, Language::Vi) => "Chuyển Mặt bằng 2D sang 3D",
        (FeatureKey::RealToTechDrawing, Language::En) => "Real Photo to 2D Tech Drawing",
        (FeatureKey::RealToTechDrawing, Language::Vi) => {
            "Chuyển Ảnh Thực thành Bản vẽ Kỹ thuật 2D"
        }
        (FeatureKey::CostCalculation, Language::En) => "Cost & Size Calculation",
        (FeatureKey::CostCalculation, Language::Vi) => "Tính toán Kích thước & Chi phí",
        (FeatureKey::TaskGenerator, Language::En) => "Task List Generator",
        (FeatureKey::TaskGenerator, Language::Vi) => "Tạo Danh sách Công việc",
    }
}

/// Feature-specific framing sentence prepended to the user instruction when
/// an image is attached. Anchors the model's transformation to the correct
/// feature semantics. Features without a framing use the raw instruction.
pub fn framing_prefix(key: FeatureKey, language: Language) -> Option<&'static str> {
    match (key, language) {
        (FeatureKey::SurrealExterior, Language::En) => Some(
            "Carefully analyze the architectural elements in the source image. Retain the main structure and layout, then transform it according to the following prompt:",
        ),
        (FeatureKey::SurrealExterior, Language::Vi) => Some(
            "Phân tích kỹ cấu trúc, bố cục và kết cấu của ảnh gốc. Đảm bảo giữ lại các yếu tố kiến trúc chính và không thay đổi đáng kể bố cục. Sau đó, biến đổi nó theo yêu cầu sau:",
        ),
        (FeatureKey::InstantInterior, Language::En) => Some(
            "Carefully analyze the layout and structure of the room in the image. Keep the core elements (windows, doors) intact, and redesign the interior according to the following request:",
        ),
        (FeatureKey::InstantInterior, Language::Vi) => Some(
            "Phân tích kỹ bố cục, cấu trúc và kết cấu của căn phòng trong ảnh. Đảm bảo giữ lại các yếu tố chính như cửa sổ, cửa ra vào, và không thay đổi đáng kể bố cục. Thiết kế lại nội thất theo yêu cầu sau:",
        ),
        (FeatureKey::MasterPlan, Language::En) => Some(
            "Using this map or satellite image as a base, create a master plan. Ensure your design integrates tightly with the existing features shown in the image. Detailed request:",
        ),
        (FeatureKey::MasterPlan, Language::Vi) => Some(
            "Dựa trên bản đồ hoặc ảnh vệ tinh này, hãy tạo ra một bản quy hoạch tổng thể. Đảm bảo thiết kế của bạn tích hợp chặt chẽ với các đặc điểm hiện có trong ảnh. Yêu cầu chi tiết:",
        ),
        (FeatureKey::SketchupFinalize, Language::En) => Some(
            "Analyze this sketch or line model. Render it into a photorealistic image, adding realistic textures and lighting. STRICTLY DO NOT change the underlying architectural shape. Detailed request:",
        ),
        (FeatureKey::SketchupFinalize, Language::Vi) => Some(
            "Phân tích bản phác thảo hoặc mô hình đường nét này. Render nó thành một hình ảnh quang học, thêm vào các kết cấu và ánh sáng thực tế. TUYỆT ĐỐI KHÔNG thay đổi hình dạng kiến trúc cơ bản. Yêu cầu chi tiết:",
        ),
        (FeatureKey::PlanTo3d, Language::En) => Some(
            "Based on this 2D floor plan, extrude a 3D block model. The model must accurately reflect the proportions and arrangement of rooms as shown in the drawing. Detailed request:",
        ),
        (FeatureKey::PlanTo3d, Language::Vi) => Some(
            "Dựa trên mặt bằng 2D này, hãy dựng một mô hình khối 3D. Mô hình phải phản ánh chính xác tỷ lệ và cách sắp xếp các phòng như trong bản vẽ. Yêu cầu chi tiết:",
        ),
        (FeatureKey::RealToTechDrawing, Language::En) => Some(
            "Analyze this real photograph and convert it into a 2D technical drawing. The drawing must accurately represent the proportions and architectural details present in the photo. Detailed request:",
        ),
        (FeatureKey::RealToTechDrawing, Language::Vi) => Some(
            "Phân tích ảnh chụp thực tế này và chuyển đổi nó thành một bản vẽ kỹ thuật 2D. Bản vẽ phải thể hiện chính xác tỷ lệ và các chi tiết kiến trúc có trong ảnh. Yêu cầu chi tiết:",
        ),
        _ => None,
    }
}

/// Style-preset prefix for text-to-image generation. `none` (or an unknown
/// preset) applies nothing.
pub fn style_prefix(preset: &str) -> Option<&'static str> {
    match preset {
        "photorealistic" => Some("A photorealistic, hyper-detailed photograph of"),
        "cartoon" => Some("A vibrant cartoon-style illustration of"),
        "impressionist" => Some("An impressionist painting of"),
        "digital_art" => Some("A digital art piece of"),
        "cinematic" => Some("A cinematic, dramatic, wide-angle shot of"),
        _ => None,
    }
}

/// Detail-level suffix for text-to-image generation. `medium` has none.
pub fn detail_suffix(level: &str) -> Option<&'static str> {
    match level {
        "low" => Some(", simple, low detail"),
        "high" => Some(", intricate details, hyper-detailed, sharp focus"),
        _ => None,
    }
}

/// Composite template for the smart-edit feature, explicitly naming the
/// second image as the decal/detail source.
pub fn smart_edit_instruction(prompt: &str) -> String {
    format!(
        "Using the second image as a decal/detail/texture, modify the first image according to the instruction: \"{}\"",
        prompt
    )
}

fn line_thickness_label(key: &str, language: Language) -> &str {
    match (key, language) {
        ("thin", Language::En) => "Thin",
        ("thin", Language::Vi) => "Mỏng",
        ("medium", Language::En) => "Medium",
        ("medium", Language::Vi) => "Vừa",
        ("thick", Language::En) => "Thick",
        ("thick", Language::Vi) => "Dày",
        _ => key,
    }
}

fn line_style_label(key: &str, language: Language) -> &str {
    match (key, language) {
        ("solid", Language::En) => "Solid",
        ("solid", Language::Vi) => "Nét liền",
        ("dashed", Language::En) => "Dashed",
        ("dashed", Language::Vi) => "Nét đứt",
        ("dotted", Language::En) => "Dotted",
        ("dotted", Language::Vi) => "Nét chấm",
        _ => key,
    }
}

fn symbol_library_label(key: &str, language: Language) -> &str {
    match (key, language) {
        ("generic", Language::En) => "Generic",
        ("generic", Language::Vi) => "Chung",
        ("ansi", Language::En) => "ANSI (American)",
        ("ansi", Language::Vi) => "ANSI (Mỹ)",
        ("iso", Language::En) => "ISO (International)",
        ("iso", Language::Vi) => "ISO (Quốc tế)",
        _ => key,
    }
}

/// Specification sentence appended after the technical-drawing framing,
/// built from the four drawing options via a fixed per-language template.
pub fn tech_drawing_specifications(
    scale: &str,
    thickness: &str,
    style: &str,
    library: &str,
    language: Language,
) -> String {
    let thickness = line_thickness_label(thickness, language);
    let style = line_style_label(style, language);
    let library = symbol_library_label(library, language);
    match language {
        Language::En => format!(
            "Adhere to the following drawing specifications: The drawing scale is {}. The line thickness should be {}. The line style should be {}. Use the {} architectural symbol library.",
            scale, thickness, style, library
        ),
        Language::Vi => format!(
            "Hãy tuân thủ các thông số kỹ thuật sau: Tỷ lệ bản vẽ là {}. Độ dày nét vẽ là {}. Kiểu nét vẽ là {}. Sử dụng thư viện ký hiệu kiến trúc {}.",
            scale, thickness, style, library
        ),
    }
}

/// Full instruction for an image-to-image run: framing prefix (when the
/// feature has one) plus the user prompt, plus the drawing-specification
/// sentence for the technical-drawing feature.
pub fn image_instruction(
    key: FeatureKey,
    prompt: &str,
    settings: &RenderSettings,
    language: Language,
) -> String {
    let mut instruction = match framing_prefix(key, language) {
        Some(prefix) => format!("{} {}", prefix, prompt),
        None => prompt.to_string(),
    };

    if key == FeatureKey::RealToTechDrawing {
        if let (Some(scale), Some(thickness), Some(style), Some(library)) = (
            settings.drawing_scale.as_deref(),
            settings.line_thickness.as_deref(),
            settings.line_style.as_deref(),
            settings.symbol_library.as_deref(),
        ) {
            instruction.push(' ');
            instruction.push_str(&tech_drawing_specifications(
                scale, thickness, style, library, language,
            ));
        }
    }

    instruction
}

/// Final prompt for a text-to-image run: style prefix first, detail suffix
/// last, in that order.
pub fn text_to_image_prompt(prompt: &str, settings: &RenderSettings) -> String {
    let mut final_prompt = match settings.style_preset.as_deref().and_then(style_prefix) {
        Some(prefix) => format!("{} {}", prefix, prompt),
        None => prompt.to_string(),
    };
    if let Some(suffix) = settings.detail_level.as_deref().and_then(detail_suffix) {
        final_prompt.push_str(suffix);
    }
    final_prompt
}

/// System instruction for the cost-calculation feature. Currency follows the
/// UI language: VND for Vietnamese, USD otherwise.
pub fn cost_system_instruction(language: Language) -> String {
    format!(
        "You are an expert construction cost estimator. Analyze the user's prompt (and optional image) to provide a preliminary cost and size analysis for the architectural project. Respond in the user's language ({}). Provide costs in Vietnamese Dong (VND) if the language is Vietnamese, otherwise use US Dollars (USD).",
        language.code()
    )
}

/// System instruction for the task-generator feature, parameterized by the
/// date range, crew size, and project dimensions supplied in the settings.
/// The dimension clause is omitted entirely unless both length and width are
/// present.
pub fn task_system_instruction(language: Language, settings: &RenderSettings) -> String {
    let mut instruction = String::from(
        "You are an expert project manager for architectural projects. Analyze the user's prompt to generate a structured list of tasks grouped by the type of worker responsible (for example mason, electrician, carpenter, painter). For each worker type, estimate how many workers are needed.",
    );

    if let (Some(start), Some(end)) = (
        settings.start_date.as_deref(),
        settings.end_date.as_deref(),
    ) {
        instruction.push_str(&format!(" The project runs from {} to {}.", start, end));
    }
    if let Some(count) = settings.worker_count {
        instruction.push_str(&format!(
            " A total crew of {} workers is available.",
            count
        ));
    }
    if let Some(clause) = dimension_clause(settings) {
        instruction.push_str(&clause);
    }

    instruction.push_str(
        " Timeframes for each task should be flexible and realistic within the project window (for example \"Week 1-2\" or a concrete date).",
    );
    instruction.push_str(&format!(
        " Respond in the user's language ({}).",
        language.code()
    ));
    instruction
}

/// Dimension clause in meters. Requires length and width; height is
/// appended when present.
fn dimension_clause(settings: &RenderSettings) -> Option<String> {
    let length = settings.dimension_length?;
    let width = settings.dimension_width?;
    let mut clause = format!(" The actual project dimensions are {}m x {}m", length, width);
    if let Some(height) = settings.dimension_height {
        clause.push_str(&format!(" x {}m", height));
    }
    clause.push('.');
    Some(clause)
}

/// Response schema for the cost-calculation feature, in the API's
/// structured-output schema dialect.
pub fn cost_report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "currency": {
                "type": "STRING",
                "description": "Currency code, e.g., USD or VND"
            },
            "summary": {
                "type": "OBJECT",
                "properties": {
                    "total_area": {
                        "type": "NUMBER",
                        "description": "Total estimated area in square meters."
                    },
                    "total_cost": {
                        "type": "NUMBER",
                        "description": "Total estimated cost."
                    }
                },
                "required": ["total_area", "total_cost"]
            },
            "breakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "item": {
                            "type": "STRING",
                            "description": "Name of the cost item (e.g., Foundation, Structure)."
                        },
                        "cost": {
                            "type": "NUMBER",
                            "description": "Estimated cost for this item."
                        },
                        "details": {
                            "type": "STRING",
                            "description": "Brief details or assumptions for this item."
                        }
                    },
                    "required": ["item", "cost", "details"]
                }
            }
        },
        "required": ["currency", "summary", "breakdown"]
    })
}

/// Response schema for the task-generator feature: tasks grouped by worker
/// type, with an estimated headcount per group.
pub fn task_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectName": {
                "type": "STRING",
                "description": "The name of the project the tasks are for."
            },
            "workerBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "workerType": {
                            "type": "STRING",
                            "description": "The trade responsible for this group of tasks (e.g., Mason, Electrician)."
                        },
                        "estimatedWorkers": {
                            "type": "INTEGER",
                            "description": "Estimated number of workers of this type."
                        },
                        "tasks": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "taskName": {
                                        "type": "STRING",
                                        "description": "The name or description of the task."
                                    },
                                    "priority": {
                                        "type": "STRING",
                                        "description": "Priority level (e.g., High, Medium, Low)."
                                    },
                                    "timeframe": {
                                        "type": "STRING",
                                        "description": "Suggested timeframe (e.g., \"Week 1-2\", \"2024-12-25\")."
                                    }
                                },
                                "required": ["taskName", "priority", "timeframe"]
                            }
                        }
                    },
                    "required": ["workerType", "estimatedWorkers", "tasks"]
                }
            }
        },
        "required": ["projectName", "workerBreakdown"]
    })
}

/// Prompt used to suggest 3-4 starting instructions from an uploaded image.
pub fn suggestion_prompt(key: FeatureKey, language: Language) -> &'static str {
    match (key, language) {
        (FeatureKey::SurrealExterior, Language::En) => "You are an architectural assistant AI. Analyze this exterior image and suggest 3-4 creative prompts to transform it into a surreal render. Focus on changes to materials, lighting, environment, or architectural style.",
        (FeatureKey::SurrealExterior, Language::Vi) => "Bạn là một AI trợ lý kiến trúc. Phân tích hình ảnh ngoại thất này và đề xuất 3-4 prompt sáng tạo để biến đổi nó thành một phối cảnh siêu thực. Tập trung vào các thay đổi về vật liệu, ánh sáng, môi trường, hoặc phong cách kiến trúc.",
        (FeatureKey::InstantInterior, Language::En) => "You are an interior designer AI. Analyze this interior photo and suggest 3-4 different design styles that could be applied to this space (e.g., Minimalist, Mid-century Modern, Scandinavian, Industrial).",
        (FeatureKey::InstantInterior, Language::Vi) => "Bạn là một AI trợ lý thiết kế nội thất. Phân tích hình ảnh nội thất này và đề xuất 3-4 phong cách thiết kế khác nhau có thể áp dụng cho không gian này (ví dụ: Tối giản, Hiện đại giữa thế kỷ, Scandinavian, Công nghiệp).",
        (FeatureKey::MasterPlan, Language::En) => "You are an urban planner AI. Analyze this map/satellite image and suggest 3-4 different master plan concepts (e.g., high-density residential, mixed-use commercial center, central park).",
        (FeatureKey::MasterPlan, Language::Vi) => "Bạn là một AI trợ lý quy hoạch đô thị. Phân tích bản đồ/ảnh vệ tinh này và đề xuất 3-4 ý tưởng quy hoạch tổng thể khác nhau (ví dụ: khu dân cư mật độ cao, khu phức hợp thương mại, công viên trung tâm).",
        (FeatureKey::SmartEdit, Language::En) => "You are an architectural photo editing AI. Analyze this image and suggest 3-4 specific, concrete changes that could be made (e.g., 'change wall material to brick', 'add plants to the balcony', 'make the sky clearer').",
        (FeatureKey::SmartEdit, Language::Vi) => "Bạn là một AI trợ lý chỉnh sửa ảnh kiến trúc. Phân tích hình ảnh này và đề xuất 3-4 thay đổi cụ thể có thể thực hiện (ví dụ: 'thay đổi vật liệu tường thành gạch', 'thêm cây xanh ở ban công', 'làm cho bầu trời trong xanh hơn').",
        (FeatureKey::SketchupFinalize, Language::En) => "You are a rendering specialist AI. Analyze this line drawing/sketchup model and suggest 3-4 different rendering scenarios focusing on materials, time of day, or context (e.g., 'render with concrete and glass materials, daylight', 'place in an urban context at dusk').",
        (FeatureKey::SketchupFinalize, Language::Vi) => "Bạn là một AI chuyên gia render. Phân tích bản vẽ đường nét/sketchup này và đề xuất 3-4 kịch bản render khác nhau, tập trung vào vật liệu, ánh sáng ban ngày, hoặc bối cảnh (ví dụ: 'render với vật liệu bê tông và kính, ánh sáng ban ngày', 'đặt trong bối cảnh đô thị vào lúc hoàng hôn').",
        (FeatureKey::PlanTo3d, Language::En) => "You are a 3D modeling AI. Analyze this 2D floor plan and suggest 3-4 prompts for creating a 3D model, focusing on different block styles (e.g., 'simple white block model', '3D model with basic materials', 'cut-away 3D model showing interior').",
        (FeatureKey::PlanTo3d, Language::Vi) => "Bạn là một AI chuyên gia mô hình hóa 3D. Phân tích mặt bằng 2D này và đề xuất 3-4 prompt để tạo mô hình 3D, tập trung vào các kiểu khối khác nhau (ví dụ: 'mô hình khối trắng đơn giản', 'mô hình 3D với vật liệu cơ bản', 'mô hình 3D cắt lớp để lộ nội thất').",
        (FeatureKey::RealToTechDrawing, Language::En) => "You are an architectural assistant AI. Analyze this building photo and suggest 3-4 types of technical drawings that could be generated from it (e.g., 'create a front elevation drawing', 'draw a detailed window cross-section', 'sketch a 2-point perspective').",
        (FeatureKey::RealToTechDrawing, Language::Vi) => "Bạn là một AI trợ lý kiến trúc sư. Phân tích hình ảnh công trình này và đề xuất 3-4 loại bản vẽ kỹ thuật có thể được tạo ra (ví dụ: 'tạo bản vẽ mặt đứng chính', 'vẽ chi tiết mặt cắt cửa sổ', 'phác thảo phối cảnh 2 điểm tụ').",
        (_, Language::En) => "Analyze this image and provide 3-4 creative, architecture-related prompt suggestions.",
        (_, Language::Vi) => "Phân tích hình ảnh này và đề xuất 3-4 prompt sáng tạo liên quan đến kiến trúc.",
    }
}

/// Marker appended to the history prompt when a refinement is accepted.
pub fn refined_label(language: Language) -> &'static str {
    match language {
        Language::En => "Refined",
        Language::Vi => "Đã tinh chỉnh",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RenderSettings {
        RenderSettings::default()
    }

    #[test]
    fn test_framing_covers_all_image_to_image_features() {
        for key in [
            FeatureKey::SurrealExterior,
            FeatureKey::InstantInterior,
            FeatureKey::MasterPlan,
            FeatureKey::SketchupFinalize,
            FeatureKey::PlanTo3d,
            FeatureKey::RealToTechDrawing,
        ] {
            assert!(framing_prefix(key, Language::En).is_some(), "{:?}", key);
            assert!(framing_prefix(key, Language::Vi).is_some(), "{:?}", key);
        }
        assert!(framing_prefix(FeatureKey::SmartEdit, Language::En).is_none());
        assert!(framing_prefix(FeatureKey::CostCalculation, Language::En).is_none());
    }

    #[test]
    fn test_image_instruction_prepends_framing() {
        let instruction = image_instruction(
            FeatureKey::InstantInterior,
            "add a beige sofa",
            &settings(),
            Language::En,
        );
        assert!(instruction.starts_with("Carefully analyze the layout"));
        assert!(instruction.ends_with("add a beige sofa"));
    }

    #[test]
    fn test_image_instruction_without_framing_is_raw() {
        let instruction = image_instruction(
            FeatureKey::CostCalculation,
            "200sqm villa",
            &settings(),
            Language::En,
        );
        assert_eq!(instruction, "200sqm villa");
    }

    #[test]
    fn test_tech_drawing_appends_specification_sentence() {
        let mut s = settings();
        s.drawing_scale = Some("1:100".to_string());
        s.line_thickness = Some("thin".to_string());
        s.line_style = Some("dashed".to_string());
        s.symbol_library = Some("iso".to_string());

        let instruction = image_instruction(
            FeatureKey::RealToTechDrawing,
            "cross-section drawing",
            &s,
            Language::En,
        );
        assert!(instruction.contains("cross-section drawing"));
        assert!(instruction.contains("The drawing scale is 1:100."));
        assert!(instruction.contains("The line thickness should be Thin."));
        assert!(instruction.contains("The line style should be Dashed."));
        assert!(instruction.contains("ISO (International) architectural symbol library"));
    }

    #[test]
    fn test_tech_drawing_sentence_skipped_without_options() {
        let instruction = image_instruction(
            FeatureKey::RealToTechDrawing,
            "cross-section drawing",
            &settings(),
            Language::En,
        );
        assert!(!instruction.contains("drawing specifications"));
    }

    #[test]
    fn test_text_to_image_style_and_detail_ordering() {
        let mut s = settings();
        s.style_preset = Some("cinematic".to_string());
        s.detail_level = Some("high".to_string());

        let prompt = text_to_image_prompt("glass villa at sunset", &s);
        assert!(prompt.starts_with("A cinematic, dramatic, wide-angle shot of glass villa"));
        assert!(prompt.ends_with(", intricate details, hyper-detailed, sharp focus"));
    }

    #[test]
    fn test_text_to_image_medium_detail_has_no_suffix() {
        let mut s = settings();
        s.detail_level = Some("medium".to_string());
        assert_eq!(text_to_image_prompt("a house", &s), "a house");
    }

    #[test]
    fn test_text_to_image_none_preset_is_ignored() {
        let mut s = settings();
        s.style_preset = Some("none".to_string());
        assert_eq!(text_to_image_prompt("a house", &s), "a house");
    }

    #[test]
    fn test_smart_edit_template_embeds_instruction() {
        let instruction = smart_edit_instruction("apply this tile pattern to the facade");
        assert_eq!(
            instruction,
            "Using the second image as a decal/detail/texture, modify the first image according to the instruction: \"apply this tile pattern to the facade\""
        );
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let mut s = settings();
        s.style_preset = Some("photorealistic".to_string());
        s.detail_level = Some("low".to_string());
        let a = text_to_image_prompt("brick house", &s);
        let b = text_to_image_prompt("brick house", &s);
        assert_eq!(a, b);

        let c = image_instruction(FeatureKey::MasterPlan, "5 towers", &s, Language::Vi);
        let d = image_instruction(FeatureKey::MasterPlan, "5 towers", &s, Language::Vi);
        assert_eq!(c, d);
    }

    #[test]
    fn test_cost_instruction_names_language_and_currencies() {
        let vi = cost_system_instruction(Language::Vi);
        assert!(vi.contains("(vi)"));
        assert!(vi.contains("VND"));
        assert!(vi.contains("USD"));

        let en = cost_system_instruction(Language::En);
        assert!(en.contains("(en)"));
    }

    #[test]
    fn test_task_instruction_includes_supplied_options() {
        let mut s = settings();
        s.start_date = Some("2024-01-01".to_string());
        s.end_date = Some("2024-01-31".to_string());
        s.worker_count = Some(5);
        s.dimension_length = Some(12.0);
        s.dimension_width = Some(8.0);
        s.dimension_height = Some(3.5);

        let instruction = task_system_instruction(Language::En, &s);
        assert!(instruction.contains("from 2024-01-01 to 2024-01-31"));
        assert!(instruction.contains("crew of 5 workers"));
        assert!(instruction.contains("12m x 8m x 3.5m"));
    }

    #[test]
    fn test_task_instruction_omits_dimension_clause_when_incomplete() {
        let mut s = settings();
        s.start_date = Some("2024-01-01".to_string());
        s.end_date = Some("2024-01-31".to_string());
        s.worker_count = Some(5);
        s.dimension_length = Some(12.0);
        // width missing: the whole clause must disappear

        let instruction = task_system_instruction(Language::En, &s);
        assert!(!instruction.contains("dimensions"));
        assert!(!instruction.contains("12m"));
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        let cost = cost_report_schema();
        assert_eq!(cost["type"], "OBJECT");
        assert!(cost["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "breakdown"));
        assert_eq!(
            cost["properties"]["summary"]["required"],
            json!(["total_area", "total_cost"])
        );

        let tasks = task_plan_schema();
        assert!(tasks["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "workerBreakdown"));
        let group = &tasks["properties"]["workerBreakdown"]["items"];
        assert_eq!(
            group["required"],
            json!(["workerType", "estimatedWorkers", "tasks"])
        );
    }

    #[test]
    fn test_suggestion_prompt_has_default() {
        let text = suggestion_prompt(FeatureKey::CostCalculation, Language::En);
        assert!(text.contains("3-4"));
    }
}
