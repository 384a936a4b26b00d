//! 时间显示

/// 把整秒时长格式化为固定宽度的 HH:MM:SS
pub fn format_timestamp(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
