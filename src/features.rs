//! Frontend feature catalog: the same fixed tool set as the backend, plus
//! the localized strings the UI needs to present each tool.

use serde::{Deserialize, Serialize};

/// Mirror of the backend feature key enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKey {
    SurrealExterior,
    InstantInterior,
    MasterPlan,
    SmartEdit,
    SketchupFinalize,
    PlanTo3d,
    RealToTechDrawing,
    CostCalculation,
    TaskGenerator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageUpload {
    None,
    Optional,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Image,
    Report,
}

/// Static UI descriptor for one tool.
pub struct FeatureInfo {
    pub key: FeatureKey,
    pub image_upload: ImageUpload,
    pub output: Output,
    pub title_en: &'static str,
    pub title_vi: &'static str,
    pub description_en: &'static str,
    pub description_vi: &'static str,
    pub placeholder_en: &'static str,
    pub placeholder_vi: &'static str,
    pub upload_label_en: &'static str,
    pub upload_label_vi: &'static str,
}

impl FeatureInfo {
    pub fn title(&self, lang: &str) -> &'static str {
        if lang == "en" { self.title_en } else { self.title_vi }
    }

    pub fn description(&self, lang: &str) -> &'static str {
        if lang == "en" { self.description_en } else { self.description_vi }
    }

    pub fn placeholder(&self, lang: &str) -> &'static str {
        if lang == "en" { self.placeholder_en } else { self.placeholder_vi }
    }

    pub fn upload_label(&self, lang: &str) -> &'static str {
        if lang == "en" { self.upload_label_en } else { self.upload_label_vi }
    }
}

pub const FEATURES: &[FeatureInfo] = &[
    FeatureInfo {
        key: FeatureKey::SurrealExterior,
        image_upload: ImageUpload::Optional,
        output: Output::Image,
        title_en: "Surreal Exterior Render",
        title_vi: "Render Ngoại thất Siêu thực",
        description_en: "Upload a real photo or drawing for AI transformation, or describe your vision to generate from scratch.",
        description_vi: "Tải lên ảnh ngoại thất hoặc bản vẽ để AI biến đổi, hoặc mô tả ý tưởng của bạn.",
        placeholder_en: "e.g., dark wood villa, minimalist style, by a lake at sunset",
        placeholder_vi: "ví dụ: biệt thự gỗ tối màu, phong cách tối giản, bên bờ hồ vào buổi hoàng hôn",
        upload_label_en: "Upload Exterior Photo or Drawing (optional)",
        upload_label_vi: "Tải lên Ảnh Ngoại thất hoặc Bản vẽ (tùy chọn)",
    },
    FeatureInfo {
        key: FeatureKey::InstantInterior,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Instant Interior Design",
        title_vi: "Thiết kế Nội thất Tức thì",
        description_en: "The AI restyles the input photo while preserving the main structure of the space.",
        description_vi: "AI sẽ thay đổi phong cách và nội thất của ảnh đầu vào, trong khi vẫn giữ lại cấu trúc chính của không gian.",
        placeholder_en: "e.g., Add a beige sofa, Scandinavian style",
        placeholder_vi: "ví dụ: Thêm một chiếc ghế sofa màu be, phong cách Bắc Âu",
        upload_label_en: "Upload an existing interior photo",
        upload_label_vi: "Tải lên Ảnh Nội thất hiện có",
    },
    FeatureInfo {
        key: FeatureKey::MasterPlan,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Master Plan Project",
        title_vi: "Quy hoạch Dự án Tổng thể",
        description_en: "Create a master plan map showing architectural blocks and green spaces.",
        description_vi: "AI sẽ tạo ra bản đồ quy hoạch tổng thể, thể hiện mối quan hệ giữa các khối kiến trúc và không gian xanh.",
        placeholder_en: "e.g., Seaside resort apartment complex, 5 towers, infinity pool",
        placeholder_vi: "ví dụ: Khu phức hợp căn hộ nghỉ dưỡng ven biển, 5 tòa tháp, hồ bơi vô cực",
        upload_label_en: "Upload existing site plan or satellite image",
        upload_label_vi: "Tải lên bản đồ hiện trạng hoặc ảnh vệ tinh",
    },
    FeatureInfo {
        key: FeatureKey::SmartEdit,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Smart Edit / Add Detail",
        title_vi: "Chỉnh sửa Thông minh / Thêm chi tiết",
        description_en: "Edit images with natural language, or add details/decals from another image.",
        description_vi: "Chỉnh sửa ảnh bằng ngôn ngữ tự nhiên hoặc thêm chi tiết/decal từ một ảnh khác.",
        placeholder_en: "e.g., Add this pattern to the main window",
        placeholder_vi: "ví dụ: Thêm hoa văn này vào cửa sổ chính",
        upload_label_en: "Main Image to Edit",
        upload_label_vi: "Ảnh chính cần chỉnh sửa",
    },
    FeatureInfo {
        key: FeatureKey::SketchupFinalize,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Finalize SketchUp Drawing",
        title_vi: "Hoàn thiện Nét vẽ SketchUp",
        description_en: "Transform a rough sketch into a high-quality render.",
        description_vi: "AI sẽ biến bản phác thảo thô thành render chất lượng cao.",
        placeholder_en: "e.g., Render with a raw concrete texture, tempered glass, with pedestrians",
        placeholder_vi: "ví dụ: Render thành kết cấu bê tông trần, kính cường lực, có người đi bộ",
        upload_label_en: "Upload a Sketchup image or line drawing",
        upload_label_vi: "Tải lên Ảnh Sketchup hoặc bản vẽ đường nét",
    },
    FeatureInfo {
        key: FeatureKey::PlanTo3d,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Convert 2D Plan to 3D",
        title_vi: "Chuyển Mặt bằng 2D sang 3D",
        description_en: "Create a 3D block-out model based on the 2D floor plan.",
        description_vi: "AI sẽ tạo ra mô hình 3D khối (block-out) dựa trên mặt bằng 2D.",
        placeholder_en: "e.g., White block 3D model, daylight, no furniture",
        placeholder_vi: "ví dụ: Mô hình 3D khối trắng, ánh sáng ban ngày, không có nội thất",
        upload_label_en: "Upload a 2D floor plan image",
        upload_label_vi: "Tải lên Ảnh Mặt bằng 2D",
    },
    FeatureInfo {
        key: FeatureKey::RealToTechDrawing,
        image_upload: ImageUpload::Required,
        output: Output::Image,
        title_en: "Real Photo to 2D Tech Drawing",
        title_vi: "Chuyển Ảnh Thực thành Bản vẽ Kỹ thuật 2D",
        description_en: "Convert a real photo into a technical drawing with professional lines and symbols.",
        description_vi: "AI sẽ chuyển đổi ảnh chụp công trình thực tế thành bản vẽ kỹ thuật chuyên nghiệp.",
        placeholder_en: "e.g., Cross-section drawing, aluminum and glass window details",
        placeholder_vi: "ví dụ: Bản vẽ mặt cắt ngang, chi tiết cửa sổ nhôm kính",
        upload_label_en: "Upload a Real Photo of the Building",
        upload_label_vi: "Tải lên Ảnh chụp công trình thực tế",
    },
    FeatureInfo {
        key: FeatureKey::CostCalculation,
        image_upload: ImageUpload::Optional,
        output: Output::Report,
        title_en: "Cost & Size Calculation",
        title_vi: "Tính toán Kích thước & Chi phí",
        description_en: "Preliminary estimate of area and construction costs based on your input.",
        description_vi: "AI sẽ ước tính sơ bộ diện tích và chi phí xây dựng dựa trên thông tin đầu vào.",
        placeholder_en: "e.g., 200sqm villa, 3 floors, main materials are concrete and glass",
        placeholder_vi: "ví dụ: biệt thự 200m2, 3 tầng, vật liệu chính là bê tông và kính",
        upload_label_en: "Upload Floor Plan or 3D Model (optional)",
        upload_label_vi: "Tải lên Mặt bằng hoặc Mô hình 3D (tùy chọn)",
    },
    FeatureInfo {
        key: FeatureKey::TaskGenerator,
        image_upload: ImageUpload::None,
        output: Output::Report,
        title_en: "Task List Generator",
        title_vi: "Tạo Danh sách Công việc",
        description_en: "Generate a task list categorized by worker type, with timelines for your project.",
        description_vi: "AI sẽ tạo danh sách công việc chi tiết, phân bổ theo từng loại thợ với mốc thời gian.",
        placeholder_en: "e.g., Plan the design and finishing work for a two-bedroom apartment interior",
        placeholder_vi: "ví dụ: Lập kế hoạch thiết kế và thi công hoàn thiện nội thất căn hộ 2 phòng ngủ",
        upload_label_en: "",
        upload_label_vi: "",
    },
];

pub fn info(key: FeatureKey) -> &'static FeatureInfo {
    FEATURES
        .iter()
        .find(|f| f.key == key)
        .expect("every FeatureKey has a FEATURES entry")
}
