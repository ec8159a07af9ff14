use crate::domain::{Coordinate, SoilProfile};
use serde::{Deserialize, Serialize};

/// Field context sent to the advisory service
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    pub area_sqm: f64,
    /// Area in rai, already rendered with two decimals
    pub area_rai: String,
    pub crop_name: String,
    pub soil_name: String,
}

/// Structured irrigation advice returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub daily_water_needs: String,
    pub best_timing: String,
    pub precautions: Vec<String>,
    pub automation_tips: String,
}

/// Soil type guessed for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilEstimate {
    pub soil_id: String,
    pub reason: String,
}

/// Remote advisory collaborator.
///
/// Implementations swallow their own failures: `None` means "no data" and
/// callers must render it as such instead of failing.
pub trait Advisor {
    fn advise(&self, request: &AdviceRequest) -> Option<Advice>;

    /// Guess which of `soils` is most likely at `at`
    fn estimate_soil(&self, at: Coordinate, soils: &[SoilProfile]) -> Option<SoilEstimate>;
}

pub fn advice_prompt(request: &AdviceRequest) -> String {
    format!(
        "ในฐานะผู้เชี่ยวชาญด้านเกษตรอัจฉริยะ ให้คำแนะนำการจัดการน้ำสำหรับพื้นที่ปลูก {crop} ใน {soil} \
ขนาด {rai} ไร่ ({sqm:.0} ตร.ม.) ในประเทศไทย:
1. ปริมาณน้ำที่เหมาะสมต่อวันในแต่ละฤดู โดยพิจารณาการกักเก็บน้ำของ {soil}
2. ช่วงเวลาที่ควรให้น้ำดีที่สุด
3. ข้อควรระวังพิเศษสำหรับพืชชนิดนี้ในดินประเภทนี้
4. วิธีตั้งค่าระบบให้น้ำอัตโนมัติให้ประหยัดน้ำที่สุด
ตอบเป็นภาษาไทยในรูปแบบ JSON",
        crop = request.crop_name,
        soil = request.soil_name,
        rai = request.area_rai,
        sqm = request.area_sqm,
    )
}

pub fn soil_prompt(at: Coordinate, soils: &[SoilProfile]) -> String {
    let names: Vec<&str> = soils.iter().map(|s| s.name.as_str()).collect();
    let ids: Vec<String> = soils.iter().map(|s| format!("\"{}\"", s.id)).collect();

    format!(
        "จากพิกัดละติจูด {lat} และลองจิจูด {lng} ในประเทศไทย ให้ระบุประเภทดินที่เป็นไปได้มากที่สุดในบริเวณนี้ \
({names}) พร้อมเหตุผลสั้นๆ
ตอบในรูปแบบ JSON: {{ \"soilId\": {ids}, \"reason\": \"string\" }}",
        lat = at.lat,
        lng = at.lng,
        names = names.join(", "),
        ids = ids.join(" | "),
    )
}

/// Multi-line text for the terminal; `None` becomes a "no advice" notice
pub fn render_advice(advice: Option<&Advice>) -> String {
    let Some(advice) = advice else {
        return "ไม่มีคำแนะนำ (no advice available)".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!("ตารางการให้น้ำ: {}\n", advice.daily_water_needs));
    out.push_str(&format!("เวลาที่เหมาะสมที่สุด: {}\n", advice.best_timing));
    out.push_str(&format!("กลยุทธ์ประหยัดน้ำ: {}\n", advice.automation_tips));
    out.push_str("ข้อควรระวังสำคัญ:");
    for p in &advice.precautions {
        out.push_str(&format!("\n  • {}", p));
    }
    out
}
