use xiangqi::fen::{make_board_fen, make_fen, parse_fen, FenError, INITIAL_FEN};
use xiangqi::{Position, Setup};

#[test]
fn positions_survive_a_fen_round_trip() {
    let fens = [
        INITIAL_FEN,
        "r1ba1a3/4kn3/2n1b4/pNp1p1p1p/4c4/6P2/P1P2R2P/1CcC5/9/2BAKAB2 w - - 0 1",
        "1C2ka3/9/C1Nab1n2/p3p3p/6p2/9/P3P3P/3AB4/3p2c2/c1BAK4 w - - 0 1",
        "1nbakabn1/r7r/1c7/p1p1C1p1p/4C2c1/9/P1P1P1P1P/9/9/RNBAKABNR b - - 4 4",
    ];
    for fen in fens {
        let setup = parse_fen(fen).expect("parse_fen");
        let pos = Position::from_setup(setup).expect("legal position");
        assert_eq!(make_fen(&pos.to_setup(), false), fen);
        assert_eq!(fen.split(' ').next(), Some(make_board_fen(pos.board()).as_str()));
    }
}

#[test]
fn played_moves_show_up_in_the_fen() {
    let mut pos = Position::new();
    for uci in ["h3e3", "h10g8", "h1g3", "i10h10"] {
        let m = xiangqi::utils::parse_uci(uci).expect("uci");
        assert!(pos.is_legal(m), "{} should be legal", uci);
        pos.play(m);
    }
    assert_eq!(
        make_fen(&pos.to_setup(), false),
        "rnbakabr1/9/1c4nc1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C1N2/9/RNBAKAB1R w - - 4 3"
    );
    assert_eq!(
        make_fen(&pos.to_setup(), true),
        "rnbakabr1/9/1c4nc1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C1N2/9/RNBAKAB1R w - -"
    );
}

#[test]
fn errors_are_reported_by_field() {
    assert_eq!("x".parse::<Setup>(), Err(FenError::Board));
    assert_eq!(
        "9/9/9/9/9/9/9/9/9/9 r".parse::<Setup>(),
        Err(FenError::Turn)
    );
    assert_eq!(FenError::Halfmoves.to_string(), "invalid halfmove clock in fen");
}
