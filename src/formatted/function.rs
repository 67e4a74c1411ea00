/// DDL for the database function formatted fields call
///
/// `to_char` renders offsets (`OF`, `TZH`, ...) in the session timezone,
/// so the function switches `TimeZone` for the duration of the call and
/// restores it afterwards. A null timestamp formats to null.
pub const DATE_FORMAT_TZ_FUNCTION: &str = r#"create or replace function public.date_format_tz(
  ts timestamptz,
  format text,
  tz text
) returns text
language plpgsql
as $$
declare
  original_tz text := current_setting('TimeZone');
  formatted text;
begin
  perform set_config('TimeZone', tz, true);
  formatted := to_char(ts, format);
  perform set_config('TimeZone', original_tz, true);
  return formatted;
end;
$$;
"#;
