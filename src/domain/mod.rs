// 領域層：記錄模型、檔案格式與 pipeline/轉換介面

pub mod model;
pub mod ports;
