// Generated by crestgen. Do not edit.

pub trait Handlers<C: ?Sized> {
    fn create(&self, conn: &mut C);
    fn index(&self, conn: &mut C);
    fn show(&self, conn: &mut C);
}

pub fn match_url<C: ?Sized, H: Handlers<C> + ?Sized>(url: &[u8], handlers: &H, conn: &mut C) -> bool {
    let mut state: usize = 0;
    let mut pos: usize = 0;
    loop {
        match state {
            0 => match url.get(pos) {
                Some(b'/') => {
                    state = 1;
                    pos += 1;
                }
                _ => return false,
            },
            1 => match url.get(pos) {
                None => state = 2,
                Some(b'b') => {
                    state = 3;
                    pos += 1;
                }
                _ => return false,
            },
            2 => {
                handlers.index(conn);
                return true;
            }
            3 => match url.get(pos) {
                Some(b'o') => {
                    state = 4;
                    pos += 1;
                }
                _ => return false,
            },
            4 => match url.get(pos) {
                Some(b'o') => {
                    state = 5;
                    pos += 1;
                }
                _ => return false,
            },
            5 => match url.get(pos) {
                Some(b'k') => {
                    state = 6;
                    pos += 1;
                }
                _ => return false,
            },
            6 => match url.get(pos) {
                Some(b's') => {
                    state = 7;
                    pos += 1;
                }
                _ => return false,
            },
            7 => match url.get(pos) {
                None => state = 8,
                Some(b'/') => {
                    state = 9;
                    pos += 1;
                }
                _ => return false,
            },
            8 => {
                handlers.show(conn);
                return true;
            }
            9 => match url.get(pos) {
                Some(b'n') => {
                    state = 10;
                    pos += 1;
                }
                _ => return false,
            },
            10 => match url.get(pos) {
                Some(b'e') => {
                    state = 11;
                    pos += 1;
                }
                _ => return false,
            },
            11 => match url.get(pos) {
                Some(b'w') => {
                    state = 12;
                    pos += 1;
                }
                _ => return false,
            },
            12 => match url.get(pos) {
                None => state = 13,
                _ => return false,
            },
            13 => {
                handlers.create(conn);
                return true;
            }
            _ => return false,
        }
    }
}
